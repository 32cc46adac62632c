//! Login page: email or username plus password.
//!
//! SYSTEM CONTEXT
//! ==============
//! Validation runs before any request. On success the gateway stores the
//! tokens and the route guard moves the visitor to the explore feed; this
//! page never navigates on its own.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{Field, IdentifierKind, LoginForm, ValidationError};

use crate::state::session::use_session;
use crate::util::auth::install_route_guard;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    install_route_guard(ctx.state(), use_navigate());

    let kind = RwSignal::new(IdentifierKind::Email);
    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let invalid = RwSignal::new(None::<ValidationError>);
    let notice = RwSignal::new(None::<String>);

    let field_error = move |field: Field| move || invalid.get().and_then(|err| err.message_for(field));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = LoginForm { kind: kind.get(), identifier: identifier.get(), password: password.get() };
        if let Err(err) = form.validate() {
            invalid.set(Some(err));
            return;
        }
        invalid.set(None);
        notice.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let gateway = ctx.gateway();
            leptos::task::spawn_local(async move {
                match gateway.login(form.identifier.trim(), &form.password, form.kind).await {
                    Ok(()) => {
                        let _ = notice.try_set(Some("Login successful!".to_owned()));
                    }
                    Err(failure) => {
                        let _ = notice.try_set(Some(failure.user_message()));
                    }
                }
                let _ = busy.try_set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Log in"</h1>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label">
                        {move || kind.get().label()}
                        <input
                            class="login-input"
                            type=move || if kind.get() == IdentifierKind::Email { "email" } else { "text" }
                            placeholder=move || format!("Enter your {}", kind.get().field())
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-error">{field_error(Field::Identifier)}</p>
                    <button
                        class="login-link"
                        type="button"
                        on:click=move |_| kind.update(|k| *k = k.toggled())
                    >
                        {move || format!("Use {} instead", kind.get().toggled().label().to_lowercase())}
                    </button>
                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-error">{field_error(Field::Password)}</p>
                    <label class="login-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || show_password.get()
                            on:change=move |_| show_password.update(|v| *v = !*v)
                        />
                        "Show password"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>
                <Show when=move || notice.get().is_some()>
                    <p class="login-message">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">
                    "No account? " <a href="/signup">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
