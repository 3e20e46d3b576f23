use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    /// Backdrop clicks are ignored while a request is in flight
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let busy = props.busy;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !busy {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3 class="modal-title">{props.title.clone()}</h3>
                    <button type="button" class="modal-close" onclick={on_close_click} disabled={props.busy}>
                        {"×"}
                    </button>
                </div>
                <div class="modal-content">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MessageProps {
    pub text: AttrValue,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &MessageProps) -> Html {
    html! {
        <div class="form-error">
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                <path d="M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10s10-4.48 10-10S17.52 2 12 2zm1 15h-2v-2h2v2zm0-4h-2V7h2v6z" fill="currentColor"/>
            </svg>
            {props.text.clone()}
        </div>
    }
}

#[function_component(SuccessMessage)]
pub fn success_message(props: &MessageProps) -> Html {
    html! {
        <div class="form-success">
            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                <path d="M9 16.17L4.83 12l-1.42 1.41L9 19 21 7l-1.41-1.41z" fill="currentColor"/>
            </svg>
            {props.text.clone()}
        </div>
    }
}

/// Spinner or error line for a region whose data is not ready yet
#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(LoadingPanel)]
pub fn loading_panel(props: &LoadingProps) -> Html {
    match &props.error {
        Some(error) => html! { <ErrorMessage text={error.clone()} /> },
        None => html! {
            <div class="loading">
                <div class="loading-spinner"></div>
                <p>{"Loading..."}</p>
            </div>
        },
    }
}
