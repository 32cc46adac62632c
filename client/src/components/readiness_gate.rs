//! Placeholder shown while a protected page hydrates the session.

use leptos::prelude::*;
use session::Readiness;

use crate::util::auth::readiness_message;

/// Renders `children` once `readiness` is `Ready`; otherwise a status line,
/// with a retry button after a timeout.
#[component]
pub fn ReadinessGate(readiness: ReadSignal<Readiness>, retry: Callback<()>, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show
            when=move || readiness.get() == Readiness::Ready
            fallback=move || {
                view! {
                    <div class="readiness">
                        <p class="readiness__message">{move || readiness_message(readiness.get())}</p>
                        <Show when=move || readiness.get() == Readiness::TimedOut>
                            <button class="readiness__retry" on:click=move |_| retry.run(())>
                                "Try again"
                            </button>
                        </Show>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
