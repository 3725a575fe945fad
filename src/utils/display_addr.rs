//! Best-effort discovery of the address printed in endpoint URLs.
//!
//! Only used to build display URLs when `PUBLIC_BASE_URL` is not set. No
//! packets are sent: connecting a UDP socket just selects the outbound
//! interface.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Returns the address of the outbound interface, or `127.0.0.1`.
pub fn local_ip() -> IpAddr {
    match outbound_ip() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!(error = %e, "Local IP discovery failed, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn outbound_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80))?;
    Ok(socket.local_addr()?.ip())
}

/// Builds `http://<local-ip>:<port>`.
pub fn display_base_url(port: u16) -> String {
    format!("http://{}:{}", local_ip(), port)
}
