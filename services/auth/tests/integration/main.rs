mod helpers;

mod oauth_test;
mod settings_test;
mod verification_test;
