use std::collections::BTreeMap;
use std::net::IpAddr;
use termtree::Tree;

use crate::output::tree_label;
use crate::target::TargetSpec;

/// Print a reachability sweep as a tree on stdout.
pub fn print_reachability_tree(target: &TargetSpec, results: &BTreeMap<IpAddr, bool>) {
    let reachable: Vec<IpAddr> = results
        .iter()
        .filter_map(|(addr, up)| up.then_some(*addr))
        .collect();

    let mut root = Tree::new(tree_label(format!(
        "Reachability of {} ({}/{} host(s) up)",
        target,
        reachable.len(),
        results.len()
    )));

    match target {
        TargetSpec::SingleAddress(_) => {
            for (addr, up) in results {
                let label = if *up { "reachable" } else { "not reachable" };
                root.push(Tree::new(tree_label(format!("{}: {}", addr, label))));
            }
        }
        TargetSpec::Subnet(_) => {
            // A subnet sweep only lists the hosts that answered.
            for addr in &reachable {
                root.push(Tree::new(tree_label(format!("{}: reachable", addr))));
            }
        }
    }
    println!("{}", root);
}
