use crate::gateway_state::{GatewayConfig, GatewayState};
use crate::io_struct::{ErrorResponse, GenerateNpcRequest, NpcResponse};
use actix_web::http::{Method, StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, HttpServer, get, web};
use bytes::Bytes;
use std::io::Write;

/// JSON response builder with the open CORS policy every reply carries.
fn with_cors(status: StatusCode) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder
        .content_type("application/json")
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ));
    builder
}

#[get("/health")]
pub async fn health(_req: HttpRequest, _: web::Data<GatewayState>) -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "authorization, x-client-info, apikey, content-type",
        ))
        .body("ok")
}

pub async fn method_not_allowed() -> HttpResponse {
    with_cors(StatusCode::METHOD_NOT_ALLOWED).json(ErrorResponse::new("Method Not Allowed"))
}

/// Generation endpoint. The body is taken as raw bytes so that a parse
/// failure and a missing-parameter failure produce distinct 400 errors.
pub async fn generate(body: Bytes, app_state: web::Data<GatewayState>) -> HttpResponse {
    let request: GenerateNpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejecting unparseable request body: {}", e);
            return with_cors(StatusCode::BAD_REQUEST)
                .json(ErrorResponse::new("Invalid JSON format in request body"));
        }
    };

    if !request.has_required_fields() {
        return with_cors(StatusCode::BAD_REQUEST)
            .json(ErrorResponse::new("Missing required parameters: role and trait"));
    }

    log::info!(
        "Generating NPC description for role: {}, trait: {}",
        request.role,
        request.key_trait
    );
    match app_state.generate_description(request.prompt()).await {
        Ok(description) => with_cors(StatusCode::OK).json(NpcResponse {
            npc_description: description,
        }),
        Err(e) => {
            log::error!("Failed to generate NPC description: {:#}", e);
            with_cors(StatusCode::INTERNAL_SERVER_ERROR).json(ErrorResponse::with_details(
                "Failed to generate NPC description",
                format!("{:#}", e),
            ))
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::resource(vec!["/", "/generate"])
            .route(web::post().to(generate))
            .route(web::route().method(Method::OPTIONS).to(preflight))
            .default_service(web::route().to(method_not_allowed)),
    );
}

/// Must run before any state is constructed so startup diagnostics
/// (such as a missing API key) reach a live logger.
pub fn init_logging() {
    // default level is info
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .init();
}

pub async fn startup(config: GatewayConfig, state: GatewayState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);

    println!("Starting server at {}:{}", config.host, config.port);

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(routes)
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    std::io::Result::Ok(())
}
