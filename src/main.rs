pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::adapter::outgoing::security::BcryptHasher;
use crate::modules::auth::adapter::outgoing::{
    AuthTokenRepositoryPostgres, UserQueryPostgres, UserRepositoryPostgres,
};
use crate::modules::auth::application::orchestrator::signup_orchestrator::{
    SignupFlowUseCase, SignupOrchestrator,
};
use crate::modules::auth::application::ports::outgoing::{
    AuthTokenRepository, PasswordHasher, SessionTokenProvider,
};
use crate::modules::auth::application::services::delete_account::{
    DeleteAccountService, DeleteAccountUseCase,
};
use crate::modules::auth::application::services::login::{LoginService, LoginUseCase};
use crate::modules::auth::application::services::request_password_reset::{
    RequestPasswordResetService, RequestPasswordResetUseCase,
};
use crate::modules::auth::application::services::reset_password::{
    ResetPasswordService, ResetPasswordUseCase,
};
use crate::modules::auth::application::services::signup::{SignupService, SignupUseCase};
use crate::modules::auth::application::services::verify_email::{
    VerifyEmailService, VerifyEmailUseCase,
};
use crate::modules::directory::adapter::outgoing::{
    ProfileQueryPostgres, ProfileRepositoryPostgres,
};
use crate::modules::directory::application::services::coach_directory::{
    CoachDirectoryService, CoachDirectoryUseCase,
};
use crate::modules::directory::application::services::own_profile::{
    OwnProfileService, OwnProfileUseCase,
};
use crate::modules::directory::application::services::player_directory::{
    PlayerDirectoryService, PlayerDirectoryUseCase,
};
use crate::modules::email::adapter::outgoing::SmtpEmailSender;
use crate::modules::email::application::ports::outgoing::{EmailSender, UserEmailNotifier};
use crate::modules::email::application::services::contact::{ContactService, ContactUseCase};
use crate::modules::email::application::services::UserEmailService;
use crate::modules::media::adapter::outgoing::{GcsMediaStorage, MediaRepositoryPostgres};
use crate::modules::media::application::domain::upload_policy::UploadPolicy;
use crate::modules::media::application::services::media_upload::{
    MediaUploadService, MediaUploadUseCase,
};
use crate::modules::messaging::adapter::outgoing::{ConversationStorePostgres, MessageStorePostgres};
use crate::modules::messaging::application::services::messaging::{
    MessagingService, MessagingUseCase,
};
use crate::modules::posts::adapter::outgoing::{PostQueryPostgres, PostRepositoryPostgres};
use crate::modules::posts::application::ports::outgoing::PostQuery;
use crate::modules::posts::application::services::author_posts::{
    PostAuthorService, PostAuthorUseCase,
};
use crate::modules::posts::application::services::browse_posts::{
    PostBrowseService, PostBrowseUseCase,
};
use crate::shared::api::json_config::custom_json_config;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

// Video uploads are the largest accepted body.
const MAX_UPLOAD_BYTES: usize = 110 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub signup_flow: Arc<dyn SignupFlowUseCase>,
    pub login_use_case: Arc<dyn LoginUseCase>,
    pub verify_email_use_case: Arc<dyn VerifyEmailUseCase>,
    pub request_password_reset_use_case: Arc<dyn RequestPasswordResetUseCase>,
    pub reset_password_use_case: Arc<dyn ResetPasswordUseCase>,
    pub delete_account_use_case: Arc<dyn DeleteAccountUseCase>,
    pub contact_use_case: Arc<dyn ContactUseCase>,
    pub player_directory: Arc<dyn PlayerDirectoryUseCase>,
    pub coach_directory: Arc<dyn CoachDirectoryUseCase>,
    pub own_profile: Arc<dyn OwnProfileUseCase>,
    pub post_browse: Arc<dyn PostBrowseUseCase>,
    pub post_author: Arc<dyn PostAuthorUseCase>,
    pub messaging: Arc<dyn MessagingUseCase>,
    pub media_upload: Arc<dyn MediaUploadUseCase>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    // Load Env. variables
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");

    // Links in account mail point at the frontend.
    let base_url = env::var("APP_BASE_URL").expect("APP_BASE_URL is not set in .env file");

    // SMTP SETUPS
    let from_email = env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let smtp_sender = if env::var("RUST_ENV").as_deref() == Ok("test") {
        // Local Mailpit
        let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpEmailSender::new_local(&host, port, &from_email)
    } else {
        // Production SMTP
        let smtp_server = env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    };

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    let jwt_service = JwtTokenService::new(JwtConfig::from_env());
    let token_provider_arc: Arc<dyn SessionTokenProvider> = Arc::new(jwt_service.clone());

    let password_hasher: Arc<dyn PasswordHasher> =
        if env::var("RUST_ENV").as_deref() == Ok("production") {
            Arc::new(BcryptHasher::new())
        } else {
            Arc::new(BcryptHasher::fast())
        };

    let email_sender: Arc<dyn EmailSender> = Arc::new(smtp_sender);
    let email_notifier: Arc<dyn UserEmailNotifier> = Arc::new(UserEmailService::new(
        Arc::clone(&email_sender),
        base_url,
    ));

    // Auth
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let auth_token_repo = AuthTokenRepositoryPostgres::new(Arc::clone(&db_arc));
    let auth_token_repo_arc: Arc<dyn AuthTokenRepository> = Arc::new(auth_token_repo.clone());

    let signup_uc: Arc<dyn SignupUseCase> = Arc::new(SignupService::new(
        user_repo.clone(),
        Arc::clone(&password_hasher),
    ));
    let signup_flow = SignupOrchestrator::new(
        signup_uc,
        Arc::clone(&auth_token_repo_arc),
        Arc::clone(&email_notifier),
    );

    let login_use_case = LoginService::new(
        user_query.clone(),
        Arc::clone(&password_hasher),
        Arc::clone(&token_provider_arc),
    );
    let verify_email_use_case =
        VerifyEmailService::new(user_repo.clone(), auth_token_repo.clone());
    let request_password_reset_use_case = RequestPasswordResetService::new(
        user_query.clone(),
        auth_token_repo.clone(),
        Arc::clone(&email_notifier),
    );
    let reset_password_use_case = ResetPasswordService::new(
        user_repo.clone(),
        auth_token_repo.clone(),
        Arc::clone(&password_hasher),
    );
    let delete_account_use_case = DeleteAccountService::new(user_repo.clone());

    // Contact form
    let contact_use_case = ContactService::new(
        Arc::clone(&email_sender),
        env::var("CONTACT_INBOX").ok(),
    );

    // Directory
    let profile_query = ProfileQueryPostgres::new(Arc::clone(&db_arc));
    let profile_repo = ProfileRepositoryPostgres::new(Arc::clone(&db_arc));
    let post_query = PostQueryPostgres::new(Arc::clone(&db_arc));
    let post_query_arc: Arc<dyn PostQuery> = Arc::new(post_query.clone());

    let player_directory = PlayerDirectoryService::new(profile_query.clone());
    let coach_directory =
        CoachDirectoryService::new(profile_query.clone(), Arc::clone(&post_query_arc));
    let own_profile = OwnProfileService::new(profile_query.clone(), Arc::new(profile_repo));

    // Posts
    let post_repo = PostRepositoryPostgres::new(Arc::clone(&db_arc));
    let post_browse = PostBrowseService::new(post_query);
    let post_author = PostAuthorService::new(post_repo);

    // Messaging
    let conversation_store = ConversationStorePostgres::new(Arc::clone(&db_arc));
    let message_store = MessageStorePostgres::new(Arc::clone(&db_arc));
    let messaging = MessagingService::new(conversation_store, message_store);

    // Media
    let upload_policy = UploadPolicy::from_env();
    let media_storage = GcsMediaStorage::new(upload_policy.bucket_name.clone());
    let media_repo = MediaRepositoryPostgres::new(Arc::clone(&db_arc));
    let media_upload =
        MediaUploadService::new(upload_policy, Arc::new(media_storage), Arc::new(media_repo));

    let state = AppState {
        signup_flow: Arc::new(signup_flow),
        login_use_case: Arc::new(login_use_case),
        verify_email_use_case: Arc::new(verify_email_use_case),
        request_password_reset_use_case: Arc::new(request_password_reset_use_case),
        reset_password_use_case: Arc::new(reset_password_use_case),
        delete_account_use_case: Arc::new(delete_account_use_case),
        contact_use_case: Arc::new(contact_use_case),
        player_directory: Arc::new(player_directory),
        coach_directory: Arc::new(coach_directory),
        own_profile: Arc::new(own_profile),
        post_browse: Arc::new(post_browse),
        post_author: Arc::new(post_author),
        messaging: Arc::new(messaging),
        media_upload: Arc::new(media_upload),
    };

    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::signup_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::login_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::verify_email_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::forgot_password_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::reset_password_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::delete_account_handler);
    // Directory
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::players::list_players_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::players::get_player_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::coaches::list_coaches_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::coaches::get_coach_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::own_profile::get_own_profile_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::own_profile::update_player_profile_handler);
    cfg.service(crate::modules::directory::adapter::incoming::web::routes::own_profile::update_coach_profile_handler);
    // Posts: /mine must be registered before /{post_id}
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::browse::list_posts_handler);
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::browse::list_my_posts_handler);
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::browse::get_post_handler);
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::manage::create_post_handler);
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::manage::update_post_handler);
    cfg.service(crate::modules::posts::adapter::incoming::web::routes::manage::delete_post_handler);
    // Messaging
    cfg.service(crate::modules::messaging::adapter::incoming::web::routes::conversations::open_conversation_handler);
    cfg.service(crate::modules::messaging::adapter::incoming::web::routes::conversations::list_conversations_handler);
    cfg.service(crate::modules::messaging::adapter::incoming::web::routes::messages::list_messages_handler);
    cfg.service(crate::modules::messaging::adapter::incoming::web::routes::messages::send_message_handler);
    cfg.service(crate::modules::messaging::adapter::incoming::web::routes::messages::unread_messages_handler);
    // Media
    cfg.service(crate::modules::media::adapter::incoming::web::routes::upload::upload_profile_photo_handler);
    cfg.service(crate::modules::media::adapter::incoming::web::routes::upload::upload_profile_video_handler);
    cfg.service(crate::modules::media::adapter::incoming::web::routes::upload::video_upload_config_handler);
    // Contact
    cfg.service(crate::modules::email::adapter::incoming::web::routes::contact_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
