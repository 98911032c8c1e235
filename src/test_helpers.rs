//! Shared test utilities for the image-curator test suite.
//!
//! Provides a minimal local HTTP server with canned routes, in-memory image
//! fixtures, and a config pointed at the local server.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let server = TestServer::start(vec![
//!     ("/800/600", Route::ok(jpeg_bytes(800, 600), "image/jpeg")),
//!     ("/slow", Route::ok(jpeg_bytes(10, 10), "image/jpeg").delayed(Duration::from_secs(3))),
//! ]);
//! let config = local_config(&server);
//! assert!(server.requests().is_empty());
//! ```

use crate::config::CuratorConfig;
use image::{DynamicImage, ImageFormat};
use std::io::{Read as _, Write as _};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::TryRecvError;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// =========================================================================
// Local HTTP server
// =========================================================================

/// A canned response.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub delay: Duration,
}

impl Route {
    pub fn ok(body: Vec<u8>, content_type: &'static str) -> Self {
        Self {
            status: 200,
            body,
            content_type,
            delay: Duration::ZERO,
        }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::ok(value.to_string().into_bytes(), "application/json")
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error".to_vec(),
            content_type: "text/plain",
            delay: Duration::ZERO,
        }
    }

    /// Hold the response back, to trip client timeouts.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Threaded HTTP/1.1 server on an ephemeral localhost port.
///
/// Requests are matched by the longest route whose path is a prefix of the
/// request path (query string ignored). Unmatched paths get a 404. Every
/// request target, query included, is logged for assertions.
pub struct TestServer {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let routes: Arc<Vec<(String, Route)>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if !matches!(rx.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = Arc::clone(&routes);
                        let log = Arc::clone(&log);
                        thread::spawn(move || serve_request(stream, &routes, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            requests,
            _stop: tx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Request targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn serve_request(mut stream: TcpStream, routes: &[(String, Route)], log: &Mutex<Vec<String>>) {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    log.lock().unwrap().push(target.clone());

    let path = target.split('?').next().unwrap_or("/");
    let route = routes
        .iter()
        .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, route)| route.clone())
        .unwrap_or_else(|| Route::status(404));

    if !route.delay.is_zero() {
        thread::sleep(route.delay);
    }

    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let header = format!(
        "HTTP/1.1 {} {reason}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        route.status,
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&route.body);
}

// =========================================================================
// Image fixtures
// =========================================================================

/// Encode a solid-color PNG (RGBA, so alpha handling can be exercised).
pub fn png_bytes(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(pixel));
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Encode a gradient JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .unwrap();
    buf.into_inner()
}

// =========================================================================
// Config pointed at a local server
// =========================================================================

/// Routes serving both placeholder hosts from one server.
pub fn placeholder_routes() -> Vec<(&'static str, Route)> {
    vec![
        ("/800/600", Route::ok(jpeg_bytes(800, 600), "image/jpeg")),
        ("/800x600/", Route::ok(png_bytes(800, 600, [253, 121, 168, 255]), "image/png")),
    ]
}

/// Stock config with every host on `server`, no rate-limit pause, and
/// short timeouts.
pub fn local_config(server: &TestServer) -> CuratorConfig {
    let mut config = CuratorConfig::default();
    config.unsplash.api_url = format!("{}/search/photos", server.url());
    config.unsplash.request_delay_ms = 0;
    config.unsplash.timeout_secs = 2;
    config.placeholder.photo_url = server.url();
    config.placeholder.color_url = server.url();
    config.download.timeout_secs = 1;
    config
}
