//! HTTP front of the relay

use std::io::Cursor;

use tiny_http::{Header, Request, Response, Server, StatusCode};
use tracing::{info, warn};

use super::handler::{Relay, RelayResponse};
use crate::error::{HoaError, HoaResult};

pub fn bind(addr: &str) -> HoaResult<Server> {
    Server::http(addr).map_err(|e| HoaError::Config(format!("cannot listen on {}: {}", addr, e)))
}

/// Serve requests one after another
///
/// Stops after `limit` requests when given, otherwise runs until the
/// listener closes.
pub fn run(server: &Server, relay: &Relay, limit: Option<usize>) {
    let mut handled = 0;
    for request in server.incoming_requests() {
        handle_request(request, relay);
        handled += 1;
        if limit.is_some_and(|limit| handled >= limit) {
            break;
        }
    }
}

/// Bind `addr` and serve until the process is stopped
pub fn serve(addr: &str, relay: &Relay) -> HoaResult<()> {
    let server = bind(addr)?;
    info!(
        %addr,
        email_simulated = relay.email_simulated(),
        whatsapp_simulated = relay.whatsapp_simulated(),
        "relay listening"
    );
    run(&server, relay, None);
    Ok(())
}

fn handle_request(mut request: Request, relay: &Relay) {
    let method = request.method().to_string().to_ascii_uppercase();
    let url = request.url().to_string();

    let mut body = Vec::new();
    let answer = match request.as_reader().read_to_end(&mut body) {
        Ok(_) => relay.handle(&method, &url, &body),
        Err(e) => RelayResponse {
            status: 400,
            body: serde_json::json!({ "success": false, "error": e.to_string() }),
        },
    };
    info!(%method, %url, status = answer.status, "relay request");

    if let Err(e) = request.respond(json_response(&answer)) {
        warn!(error = %e, "failed to write relay response");
    }
}

fn json_response(answer: &RelayResponse) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::to_vec(&answer.body).unwrap_or_else(|_| b"{}".to_vec());
    let mut response = Response::from_data(body).with_status_code(StatusCode(answer.status));
    if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
        response.add_header(header);
    }
    response
}
