use rocket::request::{FromRequest, Outcome, Request};
use std::net::IpAddr;

use crate::site::Site;

pub mod health;
pub mod public;

/// Client address used to key the contact rate limit. The socket peer,
/// unless that peer is a configured trusted proxy, in which case its
/// forwarding headers name the client.
pub struct ClientIp(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // Not `client_ip()`: Rocket reads X-Real-IP there by default.
        let peer = request.remote().map(|addr| addr.ip());

        let trusted = request
            .rocket()
            .state::<Site>()
            .map(|site| site.trusted_proxies.as_slice())
            .unwrap_or(&[]);
        let forwarded = peer
            .filter(|p| trusted.contains(p))
            .and_then(|_| forwarded_client(request));
        if let Some(ip) = forwarded {
            return Outcome::Success(ClientIp(ip.to_string()));
        }

        let ip = peer
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

/// The client named by the proxy headers, if any parses as an address.
fn forwarded_client(request: &Request<'_>) -> Option<IpAddr> {
    let headers = request.headers();

    if let Some(ip) = headers.get_one("X-Real-IP").and_then(|v| v.trim().parse().ok()) {
        return Some(ip);
    }

    // X-Forwarded-For: client, proxy1, proxy2; the leftmost is the client
    headers
        .get_one("X-Forwarded-For")
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok())
}
