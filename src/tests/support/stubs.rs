use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::orchestrator::signup_orchestrator::SignupFlowUseCase;
use crate::modules::auth::application::services::delete_account::{
    DeleteAccountError, DeleteAccountUseCase,
};
use crate::modules::auth::application::services::login::{
    LoginError, LoginInput, LoginOutput, LoginUseCase,
};
use crate::modules::auth::application::services::request_password_reset::{
    RequestPasswordResetError, RequestPasswordResetUseCase,
};
use crate::modules::auth::application::services::reset_password::{
    ResetPasswordError, ResetPasswordUseCase,
};
use crate::modules::auth::application::services::signup::{SignupError, SignupInput, SignupOutput};
use crate::modules::auth::application::services::verify_email::{
    VerifyEmailError, VerifyEmailUseCase,
};
use crate::modules::directory::application::domain::profiles::{
    CoachListItem, CoachProfile, OwnProfile, PlayerDetail, PlayerListItem, PlayerProfile,
};
use crate::modules::directory::application::ports::outgoing::{
    CoachFilter, CoachProfileUpdate, PlayerFilter, PlayerProfileUpdate,
};
use crate::modules::directory::application::services::coach_directory::{
    CoachDirectoryError, CoachDirectoryUseCase, CoachProfileWithPosts,
};
use crate::modules::directory::application::services::own_profile::{
    OwnProfileError, OwnProfileUseCase,
};
use crate::modules::directory::application::services::player_directory::{
    PlayerDirectoryError, PlayerDirectoryUseCase,
};
use crate::modules::email::application::services::contact::{
    ContactError, ContactInput, ContactUseCase,
};
use crate::modules::media::application::services::media_upload::{
    MediaUploadError, MediaUploadUseCase, VideoUploadConfig,
};
use crate::modules::directory::application::domain::profiles::MediaItem;
use crate::modules::messaging::application::domain::conversation::{
    Conversation, ConversationSummary, Message,
};
use crate::modules::messaging::application::services::messaging::{
    MessagingError, MessagingUseCase,
};
use crate::modules::posts::application::domain::post::Post;
use crate::modules::posts::application::ports::outgoing::{NewPost, PostFilter, PostUpdate};
use crate::modules::posts::application::services::author_posts::{
    PostAuthorError, PostAuthorUseCase,
};
use crate::modules::posts::application::services::browse_posts::{
    PostBrowseError, PostBrowseUseCase,
};

#[derive(Default, Clone)]
pub struct StubSignupFlow;

#[async_trait]
impl SignupFlowUseCase for StubSignupFlow {
    async fn execute(&self, _input: SignupInput) -> Result<SignupOutput, SignupError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLogin;

#[async_trait]
impl LoginUseCase for StubLogin {
    async fn execute(&self, _input: LoginInput) -> Result<LoginOutput, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubVerifyEmail;

#[async_trait]
impl VerifyEmailUseCase for StubVerifyEmail {
    async fn execute(&self, _token: &str) -> Result<(), VerifyEmailError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRequestPasswordReset;

#[async_trait]
impl RequestPasswordResetUseCase for StubRequestPasswordReset {
    async fn execute(&self, _email: &str) -> Result<(), RequestPasswordResetError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubResetPassword;

#[async_trait]
impl ResetPasswordUseCase for StubResetPassword {
    async fn execute(&self, _token: &str, _new_password: &str) -> Result<(), ResetPasswordError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteAccount;

#[async_trait]
impl DeleteAccountUseCase for StubDeleteAccount {
    async fn execute(&self, _user_id: Uuid) -> Result<(), DeleteAccountError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubContact;

#[async_trait]
impl ContactUseCase for StubContact {
    async fn execute(&self, _input: ContactInput) -> Result<(), ContactError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubPlayerDirectory;

#[async_trait]
impl PlayerDirectoryUseCase for StubPlayerDirectory {
    async fn list(
        &self,
        _filter: PlayerFilter,
    ) -> Result<Vec<PlayerListItem>, PlayerDirectoryError> {
        unimplemented!("Not used in this test")
    }

    async fn get(&self, _user_id: Uuid) -> Result<PlayerDetail, PlayerDirectoryError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubCoachDirectory;

#[async_trait]
impl CoachDirectoryUseCase for StubCoachDirectory {
    async fn list(&self, _filter: CoachFilter) -> Result<Vec<CoachListItem>, CoachDirectoryError> {
        unimplemented!("Not used in this test")
    }

    async fn get(&self, _user_id: Uuid) -> Result<CoachProfileWithPosts, CoachDirectoryError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubOwnProfile;

#[async_trait]
impl OwnProfileUseCase for StubOwnProfile {
    async fn fetch(&self, _user_id: Uuid) -> Result<OwnProfile, OwnProfileError> {
        unimplemented!("Not used in this test")
    }

    async fn update_player(
        &self,
        _user_id: Uuid,
        _update: PlayerProfileUpdate,
    ) -> Result<PlayerProfile, OwnProfileError> {
        unimplemented!("Not used in this test")
    }

    async fn update_coach(
        &self,
        _user_id: Uuid,
        _update: CoachProfileUpdate,
    ) -> Result<CoachProfile, OwnProfileError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubPostBrowse;

#[async_trait]
impl PostBrowseUseCase for StubPostBrowse {
    async fn list(&self, _filter: PostFilter) -> Result<Vec<Post>, PostBrowseError> {
        unimplemented!("Not used in this test")
    }

    async fn get(&self, _post_id: Uuid, _viewer: Option<Uuid>) -> Result<Post, PostBrowseError> {
        unimplemented!("Not used in this test")
    }

    async fn mine(&self, _coach_user_id: Uuid) -> Result<Vec<Post>, PostBrowseError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubPostAuthor;

#[async_trait]
impl PostAuthorUseCase for StubPostAuthor {
    async fn create(&self, _post: NewPost) -> Result<Post, PostAuthorError> {
        unimplemented!("Not used in this test")
    }

    async fn update(
        &self,
        _post_id: Uuid,
        _coach_user_id: Uuid,
        _update: PostUpdate,
    ) -> Result<Post, PostAuthorError> {
        unimplemented!("Not used in this test")
    }

    async fn delete(&self, _post_id: Uuid, _coach_user_id: Uuid) -> Result<(), PostAuthorError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubMessaging;

#[async_trait]
impl MessagingUseCase for StubMessaging {
    async fn open_conversation(
        &self,
        _caller: Uuid,
        _other: Uuid,
    ) -> Result<Conversation, MessagingError> {
        unimplemented!("Not used in this test")
    }

    async fn list_conversations(
        &self,
        _caller: Uuid,
    ) -> Result<Vec<ConversationSummary>, MessagingError> {
        unimplemented!("Not used in this test")
    }

    async fn list_messages(
        &self,
        _caller: Uuid,
        _conversation_id: Uuid,
    ) -> Result<Vec<Message>, MessagingError> {
        unimplemented!("Not used in this test")
    }

    async fn send_message(
        &self,
        _caller: Uuid,
        _conversation_id: Uuid,
        _body: String,
        _media_url: Option<String>,
    ) -> Result<Message, MessagingError> {
        unimplemented!("Not used in this test")
    }

    async fn unread_count(&self, _caller: Uuid) -> Result<u64, MessagingError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubMediaUpload;

#[async_trait]
impl MediaUploadUseCase for StubMediaUpload {
    async fn upload_profile_photo(
        &self,
        _user_id: Uuid,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<MediaItem, MediaUploadError> {
        unimplemented!("Not used in this test")
    }

    async fn upload_profile_video(
        &self,
        _user_id: Uuid,
        _content_type: &str,
        _bytes: Vec<u8>,
        _caption: Option<String>,
    ) -> Result<MediaItem, MediaUploadError> {
        unimplemented!("Not used in this test")
    }

    fn video_upload_config(&self, _role: UserRole) -> Result<VideoUploadConfig, MediaUploadError> {
        unimplemented!("Not used in this test")
    }
}
