pub mod fixtures;

use gmlwfs::xml::Element;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const TOPP: &str = "http://www.openplans.org/topp";

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Element children of `element` with the given local name, in order.
pub fn children<'e>(element: &'e Element, local: &str) -> Vec<&'e Element> {
    element
        .elements()
        .filter(|child| child.local_name() == local)
        .collect()
}

/// The first element child with the given local name.
pub fn child<'e>(element: &'e Element, local: &str) -> &'e Element {
    element
        .elements()
        .find(|child| child.local_name() == local)
        .unwrap_or_else(|| panic!("<{}> has no <{}> child", element.local_name(), local))
}

/// Follows a path of local names from `element`.
pub fn descend<'e>(element: &'e Element, path: &[&str]) -> &'e Element {
    path.iter().fold(element, |current, local| child(current, local))
}

/// Prefixed names of the element children, e.g. `["wfs:Insert", "wfs:Update"]`.
pub fn child_names(element: &Element) -> Vec<String> {
    element.elements().map(|e| e.name.prefixed_name()).collect()
}
