use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use validator::Validate;

use crate::core::error::{AppError, PageResult};
use crate::core::extractor::AppForm;
use crate::features::auth::dtos::{CustomerSignupFormDto, LoginFormDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::constants::{
    MSG_EMAIL_TAKEN, MSG_LOGGED_OUT, MSG_LOGIN_FAILED, MSG_LOGIN_SUCCESS, MSG_SIGNUP_SUCCESS,
    SESSION_COOKIE,
};
use crate::shared::flash::{self, FlashLevel, FlashMessage};
use crate::shared::templates::render_page;
use crate::shared::validation::error_messages;

fn with_errors(mut messages: Vec<FlashMessage>, errors: Vec<String>) -> Vec<FlashMessage> {
    messages.extend(errors.into_iter().map(|message| FlashMessage {
        level: FlashLevel::Error,
        message,
    }));
    messages
}

/// Render the login page, showing pending flash messages plus `errors`.
fn login_response(
    jar: CookieJar,
    user: Option<AuthenticatedUser>,
    errors: Vec<String>,
) -> PageResult<Response> {
    let (jar, messages) = flash::take(jar);
    let html = render_page(
        "auth/login.html",
        context! {
            messages => with_errors(messages, errors),
            user => user,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

/// GET / - login form
pub async fn login_page(jar: CookieJar, user: Option<AuthenticatedUser>) -> PageResult<Response> {
    login_response(jar, user, Vec::new())
}

/// POST / - verify credentials and open a session
pub async fn login(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    AppForm(dto): AppForm<LoginFormDto>,
) -> PageResult<Response> {
    if let Err(errors) = dto.validate() {
        return login_response(jar, None, error_messages(&errors));
    }

    let Some((user, token)) = service.login(dto).await? else {
        return login_response(jar, None, vec![MSG_LOGIN_FAILED.to_string()]);
    };

    let jar = jar.add(service.sessions().session_cookie(token));
    let jar = flash::push(jar, FlashLevel::Success, MSG_LOGIN_SUCCESS);
    Ok((jar, Redirect::to(user.role.dashboard_path())).into_response())
}

fn signup_response(
    jar: CookieJar,
    form: Option<&CustomerSignupFormDto>,
    errors: Vec<String>,
) -> PageResult<Response> {
    let (jar, messages) = flash::take(jar);
    let html = render_page(
        "auth/customer_signup.html",
        context! {
            messages => with_errors(messages, errors),
            form => form,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

/// GET /customer-signup - signup form
pub async fn signup_page(jar: CookieJar) -> PageResult<Response> {
    signup_response(jar, None, Vec::new())
}

/// POST /customer-signup - register a customer account
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
    AppForm(dto): AppForm<CustomerSignupFormDto>,
) -> PageResult<Response> {
    if let Err(errors) = dto.validate() {
        return signup_response(jar, Some(&dto), error_messages(&errors));
    }

    let jar = match service.register_customer(dto).await {
        Ok(_) => flash::push(jar, FlashLevel::Success, MSG_SIGNUP_SUCCESS),
        Err(AppError::Conflict(_)) => flash::push(jar, FlashLevel::Error, MSG_EMAIL_TAKEN),
        Err(e) => return Err(e.into()),
    };

    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /logout - end the session
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    jar: CookieJar,
) -> PageResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        service.logout(cookie.value()).await?;
    }

    let jar = jar.add(service.sessions().removal_cookie());
    let jar = flash::push(jar, FlashLevel::Success, MSG_LOGGED_OUT);
    Ok((jar, Redirect::to("/")).into_response())
}
