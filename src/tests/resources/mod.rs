mod addon_tests;
mod cluster_tests;
mod provider_tests;
mod subnet_tests;
mod system_tests;
