use healthyday_core::{
    application::HealthyDayService,
    domain::{
        common::entities::app_errors::CoreError,
        session::{ports::AuthService, value_objects::Credentials},
    },
};

use crate::application::{
    errors::CliError,
    validators::{CredentialsValidator, validate_form},
};
use crate::args::CredentialsArgs;

fn credentials(args: CredentialsArgs) -> Result<Credentials, CliError> {
    validate_form(&CredentialsValidator {
        username: args.username.trim().to_string(),
        password: args.password.clone(),
    })?;
    Ok(Credentials::new(args.username.trim(), args.password))
}

pub async fn login(service: &HealthyDayService, args: CredentialsArgs) -> Result<(), CliError> {
    let user = service.login(credentials(args)?).await?;
    println!("Welcome back, {}!", user.username);
    Ok(())
}

pub async fn register(service: &HealthyDayService, args: CredentialsArgs) -> Result<(), CliError> {
    let username = args.username.trim().to_string();
    service.register(credentials(args)?).await?;
    println!(
        "Account created. Log in with `healthyday login {}`.",
        username
    );
    Ok(())
}

pub fn logout(service: &HealthyDayService) -> Result<(), CliError> {
    service.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(service: &HealthyDayService) -> Result<(), CliError> {
    match service.current_user() {
        Some(user) => println!("{} ({})", user.username, user.id),
        None if service.session().is_authenticated() => println!("Logged in."),
        None => return Err(CoreError::NotAuthenticated.into()),
    }
    Ok(())
}
