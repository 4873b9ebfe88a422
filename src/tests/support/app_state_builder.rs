use std::sync::Arc;

use crate::modules::auth::application::orchestrator::signup_orchestrator::SignupFlowUseCase;
use crate::modules::auth::application::services::delete_account::DeleteAccountUseCase;
use crate::modules::auth::application::services::login::LoginUseCase;
use crate::modules::auth::application::services::request_password_reset::RequestPasswordResetUseCase;
use crate::modules::auth::application::services::reset_password::ResetPasswordUseCase;
use crate::modules::auth::application::services::verify_email::VerifyEmailUseCase;
use crate::modules::directory::application::services::coach_directory::CoachDirectoryUseCase;
use crate::modules::directory::application::services::own_profile::OwnProfileUseCase;
use crate::modules::directory::application::services::player_directory::PlayerDirectoryUseCase;
use crate::modules::email::application::services::contact::ContactUseCase;
use crate::modules::media::application::services::media_upload::MediaUploadUseCase;
use crate::modules::messaging::application::services::messaging::MessagingUseCase;
use crate::modules::posts::application::services::author_posts::PostAuthorUseCase;
use crate::modules::posts::application::services::browse_posts::PostBrowseUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;

/// Builds an `AppState` where every use case defaults to a stub that
/// panics when touched. Tests swap in mocks for the handlers under test.
pub struct TestAppStateBuilder {
    signup_flow: Arc<dyn SignupFlowUseCase>,
    login: Arc<dyn LoginUseCase>,
    verify_email: Arc<dyn VerifyEmailUseCase>,
    request_password_reset: Arc<dyn RequestPasswordResetUseCase>,
    reset_password: Arc<dyn ResetPasswordUseCase>,
    delete_account: Arc<dyn DeleteAccountUseCase>,
    contact: Arc<dyn ContactUseCase>,
    player_directory: Arc<dyn PlayerDirectoryUseCase>,
    coach_directory: Arc<dyn CoachDirectoryUseCase>,
    own_profile: Arc<dyn OwnProfileUseCase>,
    post_browse: Arc<dyn PostBrowseUseCase>,
    post_author: Arc<dyn PostAuthorUseCase>,
    messaging: Arc<dyn MessagingUseCase>,
    media_upload: Arc<dyn MediaUploadUseCase>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            signup_flow: Arc::new(StubSignupFlow),
            login: Arc::new(StubLogin),
            verify_email: Arc::new(StubVerifyEmail),
            request_password_reset: Arc::new(StubRequestPasswordReset),
            reset_password: Arc::new(StubResetPassword),
            delete_account: Arc::new(StubDeleteAccount),
            contact: Arc::new(StubContact),
            player_directory: Arc::new(StubPlayerDirectory),
            coach_directory: Arc::new(StubCoachDirectory),
            own_profile: Arc::new(StubOwnProfile),
            post_browse: Arc::new(StubPostBrowse),
            post_author: Arc::new(StubPostAuthor),
            messaging: Arc::new(StubMessaging),
            media_upload: Arc::new(StubMediaUpload),
        }
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signup_flow(mut self, uc: Arc<dyn SignupFlowUseCase>) -> Self {
        self.signup_flow = uc;
        self
    }

    pub fn with_login(mut self, uc: Arc<dyn LoginUseCase>) -> Self {
        self.login = uc;
        self
    }

    pub fn with_verify_email(mut self, uc: Arc<dyn VerifyEmailUseCase>) -> Self {
        self.verify_email = uc;
        self
    }

    pub fn with_request_password_reset(
        mut self,
        uc: Arc<dyn RequestPasswordResetUseCase>,
    ) -> Self {
        self.request_password_reset = uc;
        self
    }

    pub fn with_reset_password(mut self, uc: Arc<dyn ResetPasswordUseCase>) -> Self {
        self.reset_password = uc;
        self
    }

    pub fn with_delete_account(mut self, uc: Arc<dyn DeleteAccountUseCase>) -> Self {
        self.delete_account = uc;
        self
    }

    pub fn with_contact(mut self, uc: Arc<dyn ContactUseCase>) -> Self {
        self.contact = uc;
        self
    }

    pub fn with_player_directory(mut self, uc: Arc<dyn PlayerDirectoryUseCase>) -> Self {
        self.player_directory = uc;
        self
    }

    pub fn with_coach_directory(mut self, uc: Arc<dyn CoachDirectoryUseCase>) -> Self {
        self.coach_directory = uc;
        self
    }

    pub fn with_own_profile(mut self, uc: Arc<dyn OwnProfileUseCase>) -> Self {
        self.own_profile = uc;
        self
    }

    pub fn with_post_browse(mut self, uc: Arc<dyn PostBrowseUseCase>) -> Self {
        self.post_browse = uc;
        self
    }

    pub fn with_post_author(mut self, uc: Arc<dyn PostAuthorUseCase>) -> Self {
        self.post_author = uc;
        self
    }

    pub fn with_messaging(mut self, uc: Arc<dyn MessagingUseCase>) -> Self {
        self.messaging = uc;
        self
    }

    pub fn with_media_upload(mut self, uc: Arc<dyn MediaUploadUseCase>) -> Self {
        self.media_upload = uc;
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            signup_flow: self.signup_flow,
            login_use_case: self.login,
            verify_email_use_case: self.verify_email,
            request_password_reset_use_case: self.request_password_reset,
            reset_password_use_case: self.reset_password,
            delete_account_use_case: self.delete_account,
            contact_use_case: self.contact,
            player_directory: self.player_directory,
            coach_directory: self.coach_directory,
            own_profile: self.own_profile,
            post_browse: self.post_browse,
            post_author: self.post_author,
            messaging: self.messaging,
            media_upload: self.media_upload,
        }
    }
}
