pub mod complete_purchase;
pub mod login;
pub mod logout;
pub mod signup;
pub mod update_profile;

pub use complete_purchase::CompletePurchaseAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use signup::SignupAction;
pub use update_profile::UpdateProfileAction;
