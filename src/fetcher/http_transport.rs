use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::app::{Result, RetrieverError};
use crate::config::HttpConfig;
use crate::domain::Locator;
use crate::fetcher::{Response, Transport};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn request(&self, locator: &Locator) -> Result<Response> {
        tracing::info!("GET {}", locator.address());

        let response = self.client.get(locator.address()).send()?;
        let final_address = response.url().to_string();

        let status = response.status();
        if !status.is_success() {
            return Err(RetrieverError::Status {
                status: status.as_u16(),
                address: final_address,
            });
        }

        if final_address != locator.address() {
            tracing::debug!("{} resolved to {}", locator.address(), final_address);
        }

        Ok(Response {
            final_address,
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Serves `/old` as a redirect to `/new`, `/new` as "hello", and 404 otherwise.
    fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle(stream);
            }
        });

        base
    }

    fn handle(mut stream: TcpStream) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let request = String::from_utf8_lossy(&request);
        let path = request.split_whitespace().nth(1).unwrap_or("/");

        let reply = match path {
            "/old" => "HTTP/1.1 302 Found\r\nLocation: /new\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
            "/new" => "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello"
                .to_string(),
            _ => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        };

        let _ = stream.write_all(reply.as_bytes());
        let _ = stream.flush();
    }

    #[test]
    fn test_follows_redirect_and_reports_final_address() {
        let base = spawn_server();
        let transport = HttpTransport::new().unwrap();
        let locator = Locator::new(format!("{}/old", base)).unwrap();

        let mut response = transport.request(&locator).unwrap();
        assert_eq!(response.final_address, format!("{}/new", base));
        assert_eq!(response.content_length, Some(5));

        let mut body = String::new();
        response.body.read_to_string(&mut body).unwrap();
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_error_status_fails_the_request() {
        let base = spawn_server();
        let transport = HttpTransport::new().unwrap();
        let locator = Locator::new(format!("{}/missing", base)).unwrap();

        let err = transport.request(&locator).unwrap_err();
        assert!(matches!(err, RetrieverError::Status { status: 404, .. }));
    }

    #[test]
    fn test_connection_refused_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let transport = HttpTransport::new().unwrap();
        let err = transport.request(&Locator::new(address).unwrap()).unwrap_err();
        assert!(matches!(err, RetrieverError::Http(_)));
    }
}
