use std::sync::LazyLock;

use vsh_idl::Interface;

/// The built-in interface description (SPEC_FULL.md §4.6, §6
/// "Interface description"). Doc comments above each method are the
/// authoritative source for `help`.
pub const BUILTIN_IDL: &str = include_str!("builtin.idl");

static BUILTIN_INTERFACE: LazyLock<Interface> =
    LazyLock::new(|| vsh_idl::parse(BUILTIN_IDL).expect("builtin.idl is valid IDL"));

pub fn builtin_interface() -> &'static Interface {
    &BUILTIN_INTERFACE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_idl_parses_and_covers_every_command() {
        let iface = builtin_interface();
        assert_eq!(iface.name, "vsh.builtin");
        let expected = [
            "Echo", "Ls", "Count", "Grep", "Help", "Jsexec", "Map", "Filter_map", "Foreach",
            "Sort", "Head", "Tail", "Uniq", "Reverse", "Sum", "Min", "Max", "Where", "Group",
            "Enumerate", "Print", "Varlink",
        ];
        for name in expected {
            let method = iface.method(name).unwrap_or_else(|| panic!("missing method {name}"));
            assert!(method.doc.is_some(), "{name} has no doc comment");
        }
    }
}
