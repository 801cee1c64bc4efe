mod persistence_tests;
mod render_property_tests;
mod session_flow_tests;
mod transform_property_tests;
