use netdev::Interface;
use std::net::Ipv4Addr;

/// Get the default network interface, if one can be determined.
pub fn default_interface() -> Option<Interface> {
    netdev::get_default_interface().ok()
}

/// Get a network interface by name.
pub fn get_interface_by_name(name: &str) -> Option<Interface> {
    netdev::get_interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
}

/// First IPv4 address assigned to the interface.
pub fn interface_ipv4(iface: &Interface) -> Option<Ipv4Addr> {
    iface.ipv4.first().map(|ip| ip.addr)
}

/// IPv4 address of the default interface, skipping loopback-only interfaces.
pub fn default_interface_ipv4() -> Option<Ipv4Addr> {
    let iface = default_interface()?;
    if iface.is_loopback() {
        return None;
    }
    interface_ipv4(&iface)
}
