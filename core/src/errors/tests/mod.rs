mod registry_error_tests;
