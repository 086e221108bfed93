use crate::Logger;
use hyper::{
    body::HttpBody,
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::{bytes, Regex};
use std::{collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// Path template such as `/decode/{digits}`; every `{name}` matches one path segment.
///
/// Captured segments are percent-decoded, so `/decode/%46%46` yields `FF`.
pub struct DynamicUri {
    regex: Regex,
    escape: bytes::Regex,
    parameters: HashMap<String, usize>,
}

const fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

impl DynamicUri {
    /// Panics on a malformed template; templates are fixed when routes are registered.
    pub fn new(uri: &str) -> Self {
        let placeholder = Regex::new(r"\{([^\{\}]*)\}").unwrap();
        let mut offset = 0;
        let mut chunks = Vec::new();
        let mut parameters = HashMap::new();
        for (index, occurence) in placeholder.find_iter(uri).enumerate() {
            let range = occurence.range();
            let name = &uri[range.start + 1..range.end - 1];
            assert!(parameters.insert(name.to_string(), index + 1).is_none(), "Duplicate parameter {}", name);
            chunks.push(regex::escape(&uri[offset..range.start]));
            chunks.push("([^/]*)".to_string());
            offset = range.end;
        }
        chunks.push(regex::escape(&uri[offset..]));
        let regex = Regex::new(&format!("^{}$", chunks.join(""))).unwrap();
        let escape = bytes::Regex::new("%([0-9A-Fa-f]{2})").unwrap();
        Self { regex, escape, parameters }
    }

    fn percent_decode(&self, segment: &str) -> String {
        let decoded = self.escape.replace_all(segment.as_bytes(), |captures: &bytes::Captures| {
            let digits = &captures[1];
            [hex_value(digits[0]) << 4 | hex_value(digits[1])]
        });
        String::from_utf8_lossy(&decoded).into_owned()
    }

    pub fn check(&self, uri: &str) -> Option<HashMap<String, String>> {
        let captures = self.regex.captures(uri)?;
        let mut parameters = HashMap::new();
        for (name, &index) in &self.parameters {
            parameters.insert(name.clone(), self.percent_decode(&captures[index]));
        }
        Some(parameters)
    }
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;
type BoxedDefaultHandler<S> = Box<dyn Fn(Request<Body>, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

impl<S> Route<S> {
    fn new(method: Method, uri: &str, handler: BoxedHandler<S>) -> Self {
        Self {
            method,
            dynamic_uri: DynamicUri::new(uri),
            handler,
        }
    }

    pub fn check(&self, request: &Request<Body>) -> Option<HashMap<String, String>> {
        if request.method() == self.method {
            self.dynamic_uri.check(request.uri().path())
        } else {
            None
        }
    }
}

pub struct Router<S> {
    default: Option<BoxedDefaultHandler<S>>,
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            default: None,
            routes: Vec::new(),
            state,
            logger,
        }
    }

    fn add<H, F>(&mut self, method: Method, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route::new(
            method,
            uri,
            Box::new(move |request, parameters, body, state| Box::pin(handler(request, parameters, body, state))),
        ));
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.default = Some(Box::new(move |request, body, state| Box::pin(handler(request, body, state))));
    }

    pub async fn route(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.logger.log(format!("{} {}", request.method(), request.uri()));
        for route in &self.routes {
            if let Some(parameters) = route.check(&request) {
                return (route.handler)(request, parameters, body, self.state.clone()).await;
            }
        }
        match &self.default {
            Some(default) => default(request, body, self.state.clone()).await,
            None => Response::builder().status(StatusCode::NOT_FOUND).body("Not Found".into()).unwrap(),
        }
    }
}

pub struct Server<S> {
    router: Router<S>,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            router: Router::new(state, logger),
        }
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::GET, uri, handler);
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H)
    where
        H: 'static + Fn(Request<Body>, HashMap<String, String>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::POST, uri, handler);
    }

    pub fn default<H, F>(&mut self, handler: H)
    where
        H: 'static + Fn(Request<Body>, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.default(handler);
    }

    /// Routes one request whose body has already been read.
    pub async fn handle(&self, request: Request<Body>, body: Vec<u8>) -> Response<Body> {
        self.router.route(request, body).await
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), hyper::Error> {
        let server = Arc::new(self);
        let make_service = make_service_fn(|_| {
            let server = server.clone();
            async {
                Ok::<_, Infallible>(service_fn(move |mut request: Request<Body>| {
                    let server = server.clone();
                    async move {
                        let mut body: Vec<u8> = Vec::new();
                        while let Some(chunk) = request.body_mut().data().await {
                            match chunk {
                                Ok(chunk) => body.extend_from_slice(&chunk),
                                Err(error) => {
                                    server.router.logger.log(format!("Could not read request body: {}", error));
                                    let response = Response::builder().status(StatusCode::BAD_REQUEST).body(Body::empty()).unwrap();
                                    return Ok::<_, Infallible>(response);
                                }
                            }
                        }
                        Ok::<_, Infallible>(server.handle(request, body).await)
                    }
                }))
            }
        });
        hyper::Server::bind(&address).serve(make_service).await
    }
}
