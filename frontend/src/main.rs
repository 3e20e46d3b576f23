mod components;
mod hooks;
mod pages;
mod services;

use gloo::events::EventListener;
use shared::Page;
use yew::prelude::*;

use crate::components::layout::Layout;
use crate::hooks::use_session;
use crate::pages::{
    BookingsPage, CalendarPage, CustomersPage, DashboardPage, LoginPage, ReportsPage,
    SettingsPage, TrainersPage, UsersPage,
};
use crate::services::{routing, AppConfig, Logger};

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());
    let session = use_session();
    let requested = use_state(routing::current_page);

    // Back/forward buttons and hand-edited addresses
    {
        let requested = requested.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "hashchange", move |_| {
                    requested.set(routing::current_page());
                })
            });
            move || drop(listener)
        });
    }

    let Some(current) = session.state.session.clone() else {
        return html! {
            <LoginPage
                on_login={session.actions.login.clone()}
                signing_in={session.state.signing_in}
                error={session.state.login_error.clone()}
            />
        };
    };

    let access = current.access();
    let page = access.resolve((*requested).unwrap_or_else(|| access.home()));
    if Some(page) != *requested {
        Logger::debug_with_component("router", &format!("showing {} instead of {:?}", page.title(), *requested));
    }

    let on_navigate = {
        let requested = requested.clone();
        Callback::from(move |page: Page| {
            routing::show_page(page);
            requested.set(Some(page));
        })
    };

    let api_client = session.api_client.clone();
    let content = match page {
        Page::Dashboard => html! { <DashboardPage {api_client} /> },
        Page::Calendar => html! { <CalendarPage {api_client} {access} config={(*config).clone()} /> },
        Page::Bookings => html! { <BookingsPage {api_client} /> },
        Page::Customers => html! { <CustomersPage {api_client} /> },
        Page::Trainers => html! { <TrainersPage {api_client} /> },
        Page::Reports => html! { <ReportsPage {api_client} {access} /> },
        Page::Settings => html! { <SettingsPage {api_client} /> },
        Page::Users => html! { <UsersPage {api_client} /> },
    };

    html! {
        <Layout user={current.user.clone()} current={page} {on_navigate} on_logout={session.actions.logout.clone()}>
            {content}
        </Layout>
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    Logger::info_with_component("app", &format!("starting, api at {}", config.api_base_url));
    yew::Renderer::<App>::new().render();
}
