use anyhow::Result;
use termtree::Tree;

use crate::cli::InterfaceArgs;
use crate::interface;
use crate::target;

/// Show the default network interface and the /24 a subnet scan would use.
pub async fn run(_args: InterfaceArgs) -> Result<()> {
    let iface = match interface::default_interface() {
        Some(iface) => iface,
        None => anyhow::bail!("failed to get default interface"),
    };

    let mut root = Tree::new(format!("Interface: {}", iface.name));
    root.push(Tree::new(format!("index: {}", iface.index)));
    if let Some(ipv4) = interface::interface_ipv4(&iface) {
        root.push(Tree::new(format!("ipv4: {}", ipv4)));
        root.push(Tree::new(format!("subnet: {}", target::derive_subnet(ipv4))));
    }
    println!("{}", root);
    Ok(())
}
