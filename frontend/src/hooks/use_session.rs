use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::{ApiClient, Logger, Session};

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub signing_in: bool,
    pub login_error: Option<String>,
}

pub struct UseSessionResult {
    pub state: SessionState,
    /// Client carrying the current token; 401 answers sign the user out
    pub api_client: ApiClient,
    pub actions: UseSessionActions,
}

#[derive(Clone)]
pub struct UseSessionActions {
    pub login: Callback<LoginRequest>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_session() -> UseSessionResult {
    let session = use_state(Session::restore);
    let signing_in = use_state(|| false);
    let login_error = use_state(|| Option::<String>::None);

    let logout = {
        let session = session.clone();
        use_callback((), move |_: (), _| {
            Logger::info_with_component("session", "signing out");
            Session::clear();
            session.set(None);
        })
    };

    let login = {
        let session = session.clone();
        let signing_in = signing_in.clone();
        let login_error = login_error.clone();

        use_callback((), move |request: LoginRequest, _| {
            let session = session.clone();
            let signing_in = signing_in.clone();
            let login_error = login_error.clone();

            signing_in.set(true);
            login_error.set(None);
            spawn_local(async move {
                match ApiClient::new().login(&request).await {
                    Ok(response) => {
                        let signed_in = Session::from(response);
                        if let Err(err) = signed_in.persist() {
                            Logger::warn_with_component("session", &format!("{:#}", err));
                        }
                        Logger::info_with_component(
                            "session",
                            &format!("signed in as {} ({})", signed_in.user.username, signed_in.user.role),
                        );
                        session.set(Some(signed_in));
                    }
                    Err(err) => {
                        Logger::warn_with_component("session", &format!("login failed: {}", err));
                        login_error.set(Some(err.user_message("Invalid username or password")));
                    }
                }
                signing_in.set(false);
            });
        })
    };

    let api_client = {
        let token = (*session).as_ref().map(|session| session.access_token.clone());
        let logout = logout.clone();
        use_memo(token, move |token| {
            let client = ApiClient::new().with_unauthorized_handler(logout);
            match token {
                Some(token) => client.with_token(token.clone()),
                None => client,
            }
        })
    };

    UseSessionResult {
        state: SessionState {
            session: (*session).clone(),
            signing_in: *signing_in,
            login_error: (*login_error).clone(),
        },
        api_client: (*api_client).clone(),
        actions: UseSessionActions { login, logout },
    }
}
