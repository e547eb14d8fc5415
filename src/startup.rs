use crate::EmailClient;
use crate::configuration::Settings;
use crate::domain::EmailAddress;
use crate::interest_log::InterestLog;
use crate::routes::{
    contact, health_check, json_error_handler, method_not_allowed, register_book_interest,
};
use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{App, HttpServer, web, web::Data};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Mailbox every intake notification is delivered to.
pub struct OperatorAddress(pub EmailAddress);

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration.email_client.client()?;
        let interest_log = InterestLog::new(configuration.intake.log_path);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            interest_log,
            configuration.intake.operator_address,
            configuration.application.allowed_origin,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    interest_log: InterestLog,
    operator_address: EmailAddress,
    allowed_origin: String,
) -> Result<Server, std::io::Error> {
    let allowed_origin = HeaderValue::from_str(&allowed_origin)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let email_client = Data::new(email_client);
    let interest_log = Data::new(interest_log);
    let operator_address = Data::new(OperatorAddress(operator_address));
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.clone()))
                    .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")),
            )
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .content_type(|_| true)
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .app_data(email_client.clone())
            .app_data(interest_log.clone())
            .app_data(operator_address.clone())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/contact")
                    .route(web::post().to(contact))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/book-interest")
                    .route(web::post().to(register_book_interest))
                    .default_service(web::to(method_not_allowed)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
