use shared::LoginRequest;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::modal::ErrorMessage;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub on_login: Callback<LoginRequest>,
    pub signing_in: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let local_error = use_state(|| Option::<String>::None);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let local_error = local_error.clone();
        let on_login = props.on_login.clone();
        let signing_in = props.signing_in;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if signing_in {
                return;
            }
            let name = username.trim().to_string();
            if name.is_empty() || password.is_empty() {
                local_error.set(Some("Enter username and password".to_string()));
                return;
            }
            local_error.set(None);
            on_login.emit(LoginRequest {
                username: name,
                password: (*password).clone(),
            });
        })
    };

    let error = (*local_error).clone().or_else(|| props.error.clone());

    html! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-brand">
                    <span class="brand-icon">{"🏓"}</span>
                    <h1>{"TT Booking"}</h1>
                    <p class="login-subtitle">{"Sign in to manage tables and bookings"}</p>
                </div>
                {if let Some(error) = error {
                    html! { <ErrorMessage text={error} /> }
                } else {
                    html! {}
                }}
                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="login-username" class="form-label">{"Username"}</label>
                        <input id="login-username" type="text" class="form-input" autocomplete="username"
                            value={(*username).clone()} oninput={on_username} disabled={props.signing_in} />
                    </div>
                    <div class="form-group">
                        <label for="login-password" class="form-label">{"Password"}</label>
                        <input id="login-password" type="password" class="form-input" autocomplete="current-password"
                            value={(*password).clone()} oninput={on_password} disabled={props.signing_in} />
                    </div>
                    <button type="submit" class="btn btn-primary btn-block" disabled={props.signing_in}>
                        {if props.signing_in { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
