use std::collections::BTreeMap;

use crate::auth::use_auth;
use crate::components::icons::GraduationCap;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use learnify_shared::{RegisterRequest, Role};

fn parse_role(value: &str) -> Role {
    match value {
        "TEACHER" => Role::Teacher,
        "ADMIN" => Role::Admin,
        _ => Role::Student,
    }
}

/// 带字段级错误提示的输入框；用户修改后清除该字段的错误
#[component]
fn FormField(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<BTreeMap<String, String>>,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).cloned());

    view! {
        <div class="form-control">
            <label class="label" for=name>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=name
                name=name
                type=input_type
                placeholder=placeholder
                class=move || if error().is_some() { "input input-bordered input-error" } else { "input input-bordered" }
                prop:value=value
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    errors.update(|e| {
                        e.remove(name);
                    });
                }
                required
            />
            {move || error().map(|msg| view! { <span class="text-error text-sm mt-1">{msg}</span> })}
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);

    let field_errors = RwSignal::new(BTreeMap::<String, String>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);
        field_errors.set(BTreeMap::new());

        let request = RegisterRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            role: Some(role.get_untracked()),
        };

        let api = auth.api();
        spawn_local(async move {
            match api.register_user(&request).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "account created");
                    router.navigate("/login");
                }
                Err(e) => {
                    set_error_msg.set(Some(e.message));
                    field_errors.set(e.errors);
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create your account"</h1>
                        <p class="text-base-content/70">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || error_msg.get().map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        <div class="grid grid-cols-2 gap-4">
                            <FormField label="First name" name="firstName" placeholder="Ana" value=first_name errors=field_errors />
                            <FormField label="Last name" name="lastName" placeholder="Lee" value=last_name errors=field_errors />
                        </div>
                        <FormField label="Email" name="email" input_type="email" placeholder="you@example.com" value=email errors=field_errors />

                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select
                                id="role"
                                class="select select-bordered"
                                on:change=move |ev| role.set(parse_role(&event_target_value(&ev)))
                            >
                                <option value="STUDENT" selected=true>"Student"</option>
                                <option value="TEACHER">"Teacher"</option>
                                <option value="ADMIN">"Administrator"</option>
                            </select>
                        </div>

                        <FormField label="Password" name="password" input_type="password" placeholder="••••••••" value=password errors=field_errors />
                        <FormField label="Confirm password" name="confirmPassword" input_type="password" placeholder="••••••••" value=confirm_password errors=field_errors />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Create Account".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
