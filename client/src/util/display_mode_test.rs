use super::*;

#[test]
fn from_standalone_maps_flag() {
    assert_eq!(HostContext::from_standalone(true), HostContext::Standalone);
    assert_eq!(HostContext::from_standalone(false), HostContext::Browser);
}

#[test]
fn default_is_browser_tab() {
    assert_eq!(HostContext::default(), HostContext::Browser);
    assert!(!HostContext::default().is_standalone());
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn detect_reports_browser_outside_hydrate() {
    assert_eq!(detect(), HostContext::Browser);
}
