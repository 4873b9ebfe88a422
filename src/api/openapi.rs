use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::modules::auth::adapter::incoming::web::routes::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, SignupRequest, SignupResponse,
    SignupUser,
};
use crate::modules::auth::application::services::login::{LoginOutput, LoginUserInfo};

// Directory
use crate::modules::directory::adapter::incoming::web::routes::own_profile::{
    UpdateCoachProfileRequest, UpdatePlayerProfileRequest,
};
use crate::modules::directory::application::domain::profiles::{
    CoachDetail, CoachListItem, CoachProfile, MediaItem, OwnProfile, PlayerDetail, PlayerListItem,
    PlayerProfile,
};
use crate::modules::directory::application::services::coach_directory::CoachProfileWithPosts;

// Posts
use crate::modules::posts::adapter::incoming::web::routes::manage::{
    CreatePostRequest, UpdatePostRequest,
};
use crate::modules::posts::application::domain::post::{Post, PostStatus, PostType};

// Messaging
use crate::modules::messaging::adapter::incoming::web::routes::conversations::OpenConversationRequest;
use crate::modules::messaging::adapter::incoming::web::routes::messages::{
    SendMessageRequest, UnreadMessagesResponse,
};
use crate::modules::messaging::application::domain::conversation::{
    Conversation, ConversationSummary, Counterpart, Message,
};

// Media
use crate::modules::media::application::services::media_upload::VideoUploadConfig;

// Contact
use crate::modules::email::adapter::incoming::web::routes::ContactRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenRoster API",
        version = "1.0.0",
        description = "API documentation for the OpenRoster youth soccer platform",
        contact(
            name = "API Support",
            email = "support@openroster.example"
        )
    ),
    paths(
        // Auth endpoints
        crate::modules::auth::adapter::incoming::web::routes::signup_handler,
        crate::modules::auth::adapter::incoming::web::routes::login_handler,
        crate::modules::auth::adapter::incoming::web::routes::verify_email_handler,
        crate::modules::auth::adapter::incoming::web::routes::forgot_password_handler,
        crate::modules::auth::adapter::incoming::web::routes::reset_password_handler,
        crate::modules::auth::adapter::incoming::web::routes::delete_account_handler,

        // Directory endpoints
        crate::modules::directory::adapter::incoming::web::routes::players::list_players_handler,
        crate::modules::directory::adapter::incoming::web::routes::players::get_player_handler,
        crate::modules::directory::adapter::incoming::web::routes::coaches::list_coaches_handler,
        crate::modules::directory::adapter::incoming::web::routes::coaches::get_coach_handler,
        crate::modules::directory::adapter::incoming::web::routes::own_profile::get_own_profile_handler,
        crate::modules::directory::adapter::incoming::web::routes::own_profile::update_player_profile_handler,
        crate::modules::directory::adapter::incoming::web::routes::own_profile::update_coach_profile_handler,

        // Post endpoints
        crate::modules::posts::adapter::incoming::web::routes::browse::list_posts_handler,
        crate::modules::posts::adapter::incoming::web::routes::browse::list_my_posts_handler,
        crate::modules::posts::adapter::incoming::web::routes::browse::get_post_handler,
        crate::modules::posts::adapter::incoming::web::routes::manage::create_post_handler,
        crate::modules::posts::adapter::incoming::web::routes::manage::update_post_handler,
        crate::modules::posts::adapter::incoming::web::routes::manage::delete_post_handler,

        // Messaging endpoints
        crate::modules::messaging::adapter::incoming::web::routes::conversations::open_conversation_handler,
        crate::modules::messaging::adapter::incoming::web::routes::conversations::list_conversations_handler,
        crate::modules::messaging::adapter::incoming::web::routes::messages::list_messages_handler,
        crate::modules::messaging::adapter::incoming::web::routes::messages::send_message_handler,
        crate::modules::messaging::adapter::incoming::web::routes::messages::unread_messages_handler,

        // Media endpoints
        crate::modules::media::adapter::incoming::web::routes::upload::upload_profile_photo_handler,
        crate::modules::media::adapter::incoming::web::routes::upload::upload_profile_video_handler,
        crate::modules::media::adapter::incoming::web::routes::upload::video_upload_config_handler,

        // Contact endpoint
        crate::modules::email::adapter::incoming::web::routes::contact_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<SignupResponse>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            SignupRequest,
            SignupResponse,
            SignupUser,
            LoginRequest,
            LoginOutput,
            LoginUserInfo,
            ForgotPasswordRequest,
            ResetPasswordRequest,

            // Directory
            PlayerProfile,
            CoachProfile,
            PlayerListItem,
            CoachListItem,
            PlayerDetail,
            CoachDetail,
            CoachProfileWithPosts,
            OwnProfile,
            MediaItem,
            UpdatePlayerProfileRequest,
            UpdateCoachProfileRequest,

            // Posts
            Post,
            PostType,
            PostStatus,
            CreatePostRequest,
            UpdatePostRequest,

            // Messaging
            Conversation,
            ConversationSummary,
            Counterpart,
            Message,
            OpenConversationRequest,
            SendMessageRequest,
            UnreadMessagesResponse,

            // Media
            VideoUploadConfig,

            // Contact
            ContactRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication and account endpoints"),
        (name = "directory", description = "Public player and coach directories"),
        (name = "profile", description = "Own profile management"),
        (name = "posts", description = "Tryout and guest player posts"),
        (name = "messaging", description = "Conversations and messages"),
        (name = "media", description = "Profile media upload endpoints"),
        (name = "contact", description = "Contact form"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
