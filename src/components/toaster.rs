//! Toaster Component
//!
//! Renders the toast queue in the corner of the window.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::toast::ToastKind;

#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="toaster">
            {move || ctx.toasts.with(|q| q.toasts().to_vec()).into_iter().map(|toast| {
                let class = match toast.kind {
                    ToastKind::Loading => "toast loading",
                    ToastKind::Success => "toast success",
                    ToastKind::Error => "toast error",
                };
                let id = toast.id;
                view! {
                    <div class=class on:click=move |_| ctx.toasts.update(|q| q.dismiss(id))>
                        {toast.message}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
