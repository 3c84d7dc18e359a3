mod test_cache;
mod test_export;
mod test_profile_properties;
mod test_vessel_basic;
