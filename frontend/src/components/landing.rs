use crate::components::icons::{ArrowRight, GraduationCap};
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-2xl">
                    <div class="flex justify-center mb-8">
                        <div class="p-5 bg-primary/10 rounded-2xl text-primary">
                            <GraduationCap attr:class="h-20 w-20" />
                        </div>
                    </div>
                    <h1 class="text-6xl font-bold">"Learn" <span class="text-primary">"ify"</span></h1>
                    <p class="py-6 text-xl text-base-content/70">
                        "The modern platform for online learning. Master new skills with expert-led courses."
                    </p>
                    <div class="flex flex-col sm:flex-row gap-4 justify-center">
                        <Link to="/login" class="btn btn-primary gap-2">
                            "Sign In" <ArrowRight attr:class="h-5 w-5" />
                        </Link>
                        <Link to="/register" class="btn btn-outline">
                            "Create Account"
                        </Link>
                    </div>
                </div>
            </div>
        </div>
    }
}
