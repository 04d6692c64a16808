pub mod mock_model;
pub mod test_app;
