use shared::{Access, Page, User};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub user: User,
    pub current: Page,
    pub on_navigate: Callback<Page>,
    pub on_logout: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Sidebar with the pages the signed-in role may open
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let access = Access::new(props.user.role);

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <div class="app-layout">
            <aside class="sidebar">
                <div class="sidebar-brand">
                    <span class="brand-icon">{"🏓"}</span>
                    <span class="brand-name">{"TT Booking"}</span>
                </div>
                <nav class="sidebar-nav">
                    {for access.visible_pages().into_iter().map(|page| {
                        let onclick = {
                            let on_navigate = props.on_navigate.clone();
                            Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                on_navigate.emit(page);
                            })
                        };
                        let class = classes!("nav-item", (page == props.current).then_some("active"));
                        html! {
                            <a href={format!("#/{}", page.slug())} {class} {onclick}>
                                <span class="nav-icon">{page.icon()}</span>
                                <span class="nav-label">{page.title()}</span>
                            </a>
                        }
                    })}
                </nav>
                <div class="sidebar-footer">
                    <div class="user-info">
                        <div class="user-name">{props.user.username.clone()}</div>
                        <div class="user-role">{props.user.role.label()}</div>
                    </div>
                    <button class="btn btn-secondary btn-logout" onclick={on_logout}>{"Logout"}</button>
                </div>
            </aside>
            <main class="main-content">
                <header class="page-header">
                    <h1>{props.current.title()}</h1>
                </header>
                {props.children.clone()}
            </main>
        </div>
    }
}
