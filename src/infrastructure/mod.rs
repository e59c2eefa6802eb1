pub mod cat_api;
