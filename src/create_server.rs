use crate::{Error, Logger, Server};
use base_n::{Codec, Unit};
use hyper::{Body, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::HashMap, fmt, sync::Arc};

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(error),
        }
    }};
}

#[derive(Deserialize)]
struct EncodeRequest {
    number: u64,
}

#[derive(Deserialize)]
struct DecodeRequest {
    digits: String,
}

#[derive(Deserialize)]
struct TextRequest {
    text: String,
}

#[derive(Deserialize)]
struct BytesRequest {
    bytes: Vec<u8>,
}

#[derive(Deserialize)]
struct EncodedRequest {
    encoded: String,
}

#[derive(Serialize)]
struct Encoded {
    encoded: String,
}

#[derive(Serialize)]
struct Decoded {
    number: u64,
}

#[derive(Serialize)]
struct Text {
    text: String,
}

#[derive(Serialize)]
struct Bytes {
    bytes: Vec<u8>,
}

#[derive(Serialize)]
struct Widths {
    byte: usize,
    code_point: usize,
}

#[derive(Serialize)]
struct AlphabetDescription {
    alphabet: String,
    base: u64,
    width: Widths,
}

#[derive(Serialize)]
struct Message {
    message: String,
}

fn parse_parameter<'a>(parameters: &'a HashMap<String, String>, name: &str) -> Result<&'a str, Error> {
    parameters
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| Error::new(format!("Missing {} parameter", name)))
}

fn parse_number(parameters: &HashMap<String, String>) -> Result<u64, Error> {
    let number = parse_parameter(parameters, "number")?;
    number
        .parse()
        .map_err(|_| Error::new(format!(r#"Invalid number parameter "{}""#, number)))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|error| Error::new(format!("Invalid JSON body ({})", error)))
}

fn respond(status: StatusCode, value: impl Serialize) -> Response<Body> {
    match serde_json::to_string(&value) {
        Ok(body) => Response::builder()
            .header("Content-Type", "application/json")
            .status(status)
            .body(body.into())
            .unwrap(),
        Err(_) => Response::builder().status(StatusCode::INTERNAL_SERVER_ERROR).body(Body::empty()).unwrap(),
    }
}

fn respond_ok(value: impl Serialize) -> Response<Body> {
    respond(StatusCode::OK, value)
}

fn respond_error(error: impl fmt::Display) -> Response<Body> {
    respond(StatusCode::BAD_REQUEST, Message { message: error.to_string() })
}

fn describe(codec: &Codec) -> AlphabetDescription {
    AlphabetDescription {
        alphabet: codec.alphabet().to_string(),
        base: codec.base(),
        width: Widths {
            byte: codec.block_width(Unit::Byte),
            code_point: codec.block_width(Unit::CodePoint),
        },
    }
}

pub fn create_server(codec: Arc<Codec>, logger: Logger) -> Server<Codec> {
    let mut server = Server::new(codec, logger);

    server.get("/alphabet", |_request, _parameters, _body, codec| async move { respond_ok(describe(&codec)) });

    server.get("/encode/{number}", |_request, parameters, _body, codec| async move {
        let number = unwrap!(parse_number(&parameters));
        respond_ok(Encoded {
            encoded: codec.encode(number),
        })
    });

    server.post("/encode", |_request, _parameters, body, codec| async move {
        let request: EncodeRequest = unwrap!(parse_body(&body));
        respond_ok(Encoded {
            encoded: codec.encode(request.number),
        })
    });

    // The router percent-decodes `{digits}`, so non-ASCII alphabets can use `%XX` escapes.
    server.get("/decode/{digits}", |_request, parameters, _body, codec| async move {
        let digits = unwrap!(parse_parameter(&parameters, "digits"));
        let number = unwrap!(codec.decode(digits));
        respond_ok(Decoded { number })
    });

    server.post("/decode", |_request, _parameters, body, codec| async move {
        let request: DecodeRequest = unwrap!(parse_body(&body));
        let number = unwrap!(codec.decode(&request.digits));
        respond_ok(Decoded { number })
    });

    server.post("/text/encode", |_request, _parameters, body, codec| async move {
        let request: TextRequest = unwrap!(parse_body(&body));
        respond_ok(Encoded {
            encoded: codec.encode_text(&request.text),
        })
    });

    server.post("/text/decode", |_request, _parameters, body, codec| async move {
        let request: EncodedRequest = unwrap!(parse_body(&body));
        let text = unwrap!(codec.decode_text(&request.encoded));
        respond_ok(Text { text })
    });

    server.post("/bytes/encode", |_request, _parameters, body, codec| async move {
        let request: BytesRequest = unwrap!(parse_body(&body));
        respond_ok(Encoded {
            encoded: codec.encode_bytes(&request.bytes),
        })
    });

    server.post("/bytes/decode", |_request, _parameters, body, codec| async move {
        let request: EncodedRequest = unwrap!(parse_body(&body));
        let bytes = unwrap!(codec.decode_bytes(&request.encoded));
        respond_ok(Bytes { bytes })
    });

    server.default(|_request, _body, _codec| async move {
        respond(
            StatusCode::NOT_FOUND,
            Message {
                message: "Not Found".to_string(),
            },
        )
    });

    server
}

#[cfg(test)]
mod tests {
    use super::create_server;
    use crate::{Logger, Server};
    use base_n::Codec;
    use hyper::{Body, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn server() -> Server<Codec> {
        create_server(Arc::new(Codec::new("0123456789ABCDEF").unwrap()), Logger::new())
    }

    async fn call(server: &Server<Codec>, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|body| body.to_string().into_bytes()).unwrap_or_default();
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = server.handle(request, body).await;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn encode() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/encode/255", None).await,
            (StatusCode::OK, json!({"encoded": "FF"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/encode", Some(json!({"number": 16}))).await,
            (StatusCode::OK, json!({"encoded": "10"}))
        );
        let (status, _) = call(&server, Method::GET, "/encode/-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn decode() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/decode/FF", None).await,
            (StatusCode::OK, json!({"number": 255}))
        );
        assert_eq!(
            call(&server, Method::POST, "/decode", Some(json!({"digits": "Z"}))).await,
            (StatusCode::BAD_REQUEST, json!({"message": "Invalid character 'Z' at index 0"}))
        );
    }

    #[tokio::test]
    async fn decode_ignores_query_string() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/decode/FF?digits=1", None).await,
            (StatusCode::OK, json!({"number": 255}))
        );
        assert_eq!(
            call(&server, Method::GET, "/encode/16?number=1", None).await,
            (StatusCode::OK, json!({"encoded": "10"}))
        );
    }

    #[tokio::test]
    async fn decode_percent_encoded_path() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/decode/%46%46", None).await,
            (StatusCode::OK, json!({"number": 255}))
        );
        let server = create_server(Arc::new(Codec::new("○●").unwrap()), Logger::new());
        assert_eq!(
            call(&server, Method::GET, "/decode/%E2%97%8F%E2%97%8B", None).await,
            (StatusCode::OK, json!({"number": 2}))
        );
    }

    #[tokio::test]
    async fn text() {
        let server = server();
        assert_eq!(
            call(&server, Method::POST, "/text/encode", Some(json!({"text": "A€"}))).await,
            (StatusCode::OK, json!({"encoded": "0000410020AC"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/text/decode", Some(json!({"encoded": "0000410020AC"}))).await,
            (StatusCode::OK, json!({"text": "A€"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/text/decode", Some(json!({"encoded": "123"}))).await,
            (
                StatusCode::BAD_REQUEST,
                json!({"message": "Invalid encoded length 3 (expecting a multiple of 6)"})
            )
        );
    }

    #[tokio::test]
    async fn bytes() {
        let server = server();
        assert_eq!(
            call(&server, Method::POST, "/bytes/encode", Some(json!({"bytes": [0, 10, 255]}))).await,
            (StatusCode::OK, json!({"encoded": "000AFF"}))
        );
        assert_eq!(
            call(&server, Method::POST, "/bytes/decode", Some(json!({"encoded": "000AFF"}))).await,
            (StatusCode::OK, json!({"bytes": [0, 10, 255]}))
        );
    }

    #[tokio::test]
    async fn alphabet() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/alphabet", None).await,
            (
                StatusCode::OK,
                json!({"alphabet": "0123456789ABCDEF", "base": 16, "width": {"byte": 2, "code_point": 6}})
            )
        );
    }

    #[tokio::test]
    async fn invalid_body() {
        let server = server();
        let (status, body) = call(&server, Method::POST, "/text/encode", Some(json!({"wrong": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn not_found() {
        let server = server();
        assert_eq!(
            call(&server, Method::GET, "/nowhere", None).await,
            (StatusCode::NOT_FOUND, json!({"message": "Not Found"}))
        );
        let (status, _) = call(&server, Method::GET, "/text/encode", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
