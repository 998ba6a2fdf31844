mod dataset_routes;
mod helpers;
