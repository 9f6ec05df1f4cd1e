use phf::phf_map;

/// Well-known TCP services keyed by port number.
static TCP_SERVICES: phf::Map<u16, &'static str> = phf_map! {
    21u16 => "ftp",
    22u16 => "ssh",
    23u16 => "telnet",
    25u16 => "smtp",
    53u16 => "domain",
    80u16 => "http",
    110u16 => "pop3",
    111u16 => "rpcbind",
    135u16 => "msrpc",
    139u16 => "netbios-ssn",
    143u16 => "imap",
    179u16 => "bgp",
    389u16 => "ldap",
    443u16 => "https",
    445u16 => "microsoft-ds",
    465u16 => "smtps",
    515u16 => "printer",
    587u16 => "submission",
    631u16 => "ipp",
    636u16 => "ldaps",
    873u16 => "rsync",
    993u16 => "imaps",
    995u16 => "pop3s",
    1080u16 => "socks",
    1433u16 => "ms-sql-s",
    1521u16 => "oracle",
    1723u16 => "pptp",
    2049u16 => "nfs",
    2375u16 => "docker",
    3128u16 => "squid-http",
    3306u16 => "mysql",
    3389u16 => "ms-wbt-server",
    5060u16 => "sip",
    5432u16 => "postgresql",
    5672u16 => "amqp",
    5900u16 => "vnc",
    5985u16 => "wsman",
    6379u16 => "redis",
    6443u16 => "kubernetes-api",
    8000u16 => "http-alt",
    8080u16 => "http-proxy",
    8443u16 => "https-alt",
    8888u16 => "sun-answerbook",
    9000u16 => "cslistener",
    9090u16 => "zeus-admin",
    9200u16 => "elasticsearch",
    11211u16 => "memcache",
    27017u16 => "mongod",
};

/// Service name for a port, "unknown" when the port is not in the table.
pub fn service_name(port: u16) -> &'static str {
    TCP_SERVICES.get(&port).copied().unwrap_or("unknown")
}

/// All well-known ports from the table, ascending.
pub fn well_known_ports() -> Vec<u16> {
    let mut ports: Vec<u16> = TCP_SERVICES.keys().copied().collect();
    ports.sort_unstable();
    ports
}
