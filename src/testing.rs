//! A local HTTP server serving canned responses, for exercising the Twitch
//! and Discord calls without the network.
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

type Routes = HashMap<(String, String), VecDeque<(u16, String)>>;

pub struct MockServer {
    server: Arc<Server>,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
    base: String,
}

impl MockServer {
    pub fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let routes: Arc<Mutex<Routes>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

        let handle = {
            let server = server.clone();
            let routes = routes.clone();
            let requests = requests.clone();
            std::thread::spawn(move || {
                while let Ok(mut request) = server.recv() {
                    let (path, query) = match request.url().split_once('?') {
                        Some((path, query)) => (String::from(path), String::from(query)),
                        None => (String::from(request.url()), String::new()),
                    };
                    let method = request.method().to_string();
                    let headers = request
                        .headers()
                        .iter()
                        .map(|header| {
                            (
                                header.field.as_str().as_str().to_ascii_lowercase(),
                                header.value.to_string(),
                            )
                        })
                        .collect();
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);

                    let (status, reply) = {
                        let mut routes = routes.lock().unwrap();
                        match routes.get_mut(&(method.clone(), path.clone())) {
                            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                            Some(queue) if !queue.is_empty() => queue[0].clone(),
                            _ => (404, String::from(r#"{"status":404,"message":"no route"}"#)),
                        }
                    };
                    requests.lock().unwrap().push(Recorded {
                        method,
                        path,
                        query,
                        headers,
                        body,
                    });

                    let response = Response::from_string(reply)
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        MockServer {
            server,
            routes,
            requests,
            handle: Some(handle),
            base: format!("http://{addr}"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Queues a response for `method path`. Responses are served in order and
    /// the last one keeps being served once the others are used up.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .entry((String::from(method), String::from(path)))
            .or_default()
            .push_back((status, body.into()));
    }

    /// Drops every response queued for `method path`.
    pub fn clear(&self, method: &str, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .remove(&(String::from(method), String::from(path)));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// An address nothing listens on.
pub fn closed_port() -> std::net::SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Query parameters (or a form body) of a recorded request, percent-decoded.
pub fn query_params(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|param| param.split_once('='))
        .map(|(k, v)| {
            (
                String::from(k),
                urlencoding::decode(&v.replace('+', " "))
                    .unwrap()
                    .into_owned(),
            )
        })
        .collect()
}
