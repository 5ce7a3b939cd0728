/// The only `AUTH_TYPE` that turns on the generator.
pub const OPENSHIFT: &str = "openshift";

/// Any other value, including an unset variable, means there is nothing to do.
pub fn is_supported(auth_type: Option<&str>) -> bool {
    auth_type == Some(OPENSHIFT)
}
