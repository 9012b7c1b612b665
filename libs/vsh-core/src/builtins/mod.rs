mod aggregate;
mod count;
mod echo;
mod enumerate;
mod foreach;
mod group;
mod grep;
mod help;
mod jsexec;
mod ls;
mod map;
mod print;
mod reverse;
mod sort;
mod take;
mod uniq;
mod varlink;
mod where_cond;

use vsh_rpc::{Registry, RegistryBuilder};

use crate::idl::builtin_interface;

/// Split a dotted path argument (`a.b.c`) into its key segments, shared
/// by every built-in that takes a field reference (`grep`, `sort`,
/// `uniq`, `where`, `group`, `sum`/`min`/`max`).
pub(crate) fn split_path(s: &str) -> Vec<String> {
    s.split('.').map(str::to_string).collect()
}

/// Build the process-wide registry of built-in handlers (SPEC_FULL.md
/// §9 "Global state"), against the single `vsh.builtin` interface.
/// `varlink` is registered like any other built-in — it is an ordinary
/// entry that happens to dispatch to an outbound RPC connection rather
/// than operating purely on its input records.
pub(crate) fn registry() -> Registry {
    RegistryBuilder::new(builtin_interface().clone())
        .register("Echo", false, echo::run)
        .register("Ls", false, ls::run)
        .register("Count", false, count::run)
        .register("Grep", false, grep::run)
        .register("Help", false, help::run)
        .register("Jsexec", false, jsexec::run)
        .register("Map", false, map::run_map)
        .register("Filter_map", false, map::run_filter_map)
        .register("Foreach", false, foreach::run)
        .register("Sort", false, sort::run)
        .register("Head", false, take::run_head)
        .register("Tail", false, take::run_tail)
        .register("Uniq", false, uniq::run)
        .register("Reverse", false, reverse::run)
        .register("Sum", false, aggregate::run_sum)
        .register("Min", false, aggregate::run_min)
        .register("Max", false, aggregate::run_max)
        .register("Where", false, where_cond::run)
        .register("Group", false, group::run)
        .register("Enumerate", false, enumerate::run)
        .register("Print", false, print::run)
        .register("Varlink", true, varlink::run)
        .build()
}
