use termtree::Tree;

use crate::output::tree_label;
use crate::report::ScanReport;

/// Print a finished scan report as a tree on stdout.
pub fn print_report_tree(report: &ScanReport) {
    let mut root = Tree::new(tree_label(format!(
        "Scan report for {} ({})",
        report.range,
        report.log_timestamp()
    )));

    for host in &report.hosts {
        let title = if host.hostname.is_empty() {
            host.address.to_string()
        } else {
            format!("{} ({})", host.address, host.hostname)
        };
        let mut host_node = Tree::new(title);
        host_node.push(Tree::new(tree_label(format!(
            "status: {}",
            host.status.as_str()
        ))));

        if !host.os_guesses.is_empty() {
            let mut os_node = Tree::new(tree_label("os"));
            for guess in &host.os_guesses {
                os_node.push(Tree::new(guess.clone()));
            }
            host_node.push(os_node);
        }

        if host.ports.is_empty() {
            host_node.push(Tree::new(tree_label("no open ports detected")));
        } else {
            for port in &host.ports {
                let mut port_node = Tree::new(tree_label(format!("{}/tcp", port.port)));
                port_node.push(Tree::new(tree_label(format!("state: {}", port.state.as_str()))));
                port_node.push(Tree::new(tree_label(format!("service: {}", port.service))));
                host_node.push(port_node);
            }
        }
        root.push(host_node);
    }
    println!("{}", root);
}
