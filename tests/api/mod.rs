mod auth_tests;
mod category_tests;
mod health_tests;
mod product_tests;
mod store_tests;
mod user_tests;
