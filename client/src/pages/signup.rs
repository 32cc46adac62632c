//! Signup page. Creates the account, then sends the visitor to login.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{Field, SignupForm, ValidationError};

use crate::state::session::use_session;
use crate::util::auth::install_route_guard;

#[cfg(feature = "hydrate")]
const LOGIN_DELAY_MS: u64 = 1500;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_session();
    let navigate = use_navigate();
    install_route_guard(ctx.state(), navigate.clone());

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let invalid = RwSignal::new(None::<ValidationError>);
    let notice = RwSignal::new(None::<String>);

    let field_error = move |field: Field| move || invalid.get().and_then(|err| err.message_for(field));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = SignupForm {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
            full_name: full_name.get(),
        };
        let registration = match form.into_registration() {
            Ok(registration) => registration,
            Err(err) => {
                invalid.set(Some(err));
                return;
            }
        };
        invalid.set(None);
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let gateway = ctx.gateway();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match gateway.register(&registration).await {
                    Ok(()) => {
                        let _ = notice.try_set(Some("Account created successfully! Please log in.".to_owned()));
                        gloo_timers::future::sleep(std::time::Duration::from_millis(LOGIN_DELAY_MS)).await;
                        navigate(session::guard::LOGIN_PATH, leptos_router::NavigateOptions::default());
                    }
                    Err(failure) => {
                        let _ = notice.try_set(Some(failure.user_message()));
                        let _ = busy.try_set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
        }
    };

    let text_field = move |label: &'static str, kind: &'static str, value: RwSignal<String>, field: Field| {
        view! {
            <label class="signup-label">
                {label}
                <input
                    class="signup-input"
                    type=kind
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
            <p class="field-error">{field_error(field)}</p>
        }
    };

    view! {
        <div class="signup-page">
            <div class="signup-card">
                <h1>"Sign up"</h1>
                <form class="signup-form" on:submit=on_submit>
                    {text_field("Username", "text", username, Field::Username)}
                    {text_field("Email", "email", email, Field::Email)}
                    {text_field("Full name", "text", full_name, Field::FullName)}
                    {text_field("Password", "password", password, Field::Password)}
                    {text_field("Confirm password", "password", confirm_password, Field::ConfirmPassword)}
                    <button class="signup-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
                <Show when=move || notice.get().is_some()>
                    <p class="signup-message">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <p class="signup-card__footer">
                    "Already have an account? " <a href="/login">"Log in"</a>
                </p>
            </div>
        </div>
    }
}
