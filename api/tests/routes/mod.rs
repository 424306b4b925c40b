mod analyze_test;
mod export_test;
mod health_test;
mod index_test;
