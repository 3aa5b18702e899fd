//! 登录后的首页，按角色分派

use crate::auth::{AuthContext, logout, update_profile, use_auth};
use crate::components::icons::{BookOpen, GraduationCap, LogOut, RefreshCw};
use crate::generation::RequestGeneration;
use leptos::prelude::*;
use leptos::task::spawn_local;
use learnify_shared::{EnrollmentCourseSummary, Role, UpdateProfileRequest, format_date};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();
    // 只在角色变化时切换视图，修改资料不会重建页面
    let role = Memo::new(move |_| user.get().map(|u| u.role));

    move || match role.get() {
        Some(Some(Role::Student)) => view! { <StudentHome /> }.into_any(),
        Some(Some(Role::Teacher)) => view! { <TeacherHome /> }.into_any(),
        Some(_) => view! { <Forbidden /> }.into_any(),
        // 会话就绪但资料尚未写入，保持空白
        None => ().into_any(),
    }
}

fn on_logout(auth: AuthContext) -> impl Fn(leptos::ev::MouseEvent) + Copy {
    move |_| {
        spawn_local(async move {
            // 跳转由路由服务监听会话变化完成
            logout(&auth).await;
        });
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <GraduationCap attr:class="text-primary h-6 w-6" />
                <span class="btn btn-ghost text-xl">"Learnify"</span>
            </div>
            <div class="flex-none gap-2">
                <div class="avatar placeholder">
                    <div class="bg-neutral text-neutral-content rounded-full w-10">
                        <span>{move || user.get().map(|u| u.initials()).unwrap_or_default()}</span>
                    </div>
                </div>
                <button on:click=on_logout(auth) class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Sign out"
                </button>
            </div>
        </div>
    }
}

/// 修改姓名
#[component]
fn ProfileEditor() -> impl IntoView {
    let auth = use_auth();
    let current = auth.user_signal();

    let first_name = RwSignal::new(current.get_untracked().map(|u| u.first_name).unwrap_or_default());
    let last_name = RwSignal::new(current.get_untracked().map(|u| u.last_name).unwrap_or_default());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_saving.set(true);
        let data = UpdateProfileRequest {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
        };
        spawn_local(async move {
            match update_profile(&auth, data).await {
                Ok(_) => set_notification.set(Some(("Profile updated".to_string(), false))),
                Err(e) => set_notification.set(Some((e.message, true))),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Profile"</h3>
                <p class="text-base-content/70 text-sm">
                    {move || current.get().map(|u| {
                        let since = u.created_at.map(|d| format!(" · member since {}", format_date(&d))).unwrap_or_default();
                        format!("{}{}", u.email, since)
                    })}
                </p>
                {move || notification.get().map(|(msg, is_err)| view! {
                    <div class=if is_err { "alert alert-error text-sm py-2" } else { "alert alert-success text-sm py-2" }>
                        <span>{msg}</span>
                    </div>
                })}
                <div class="grid grid-cols-2 gap-4">
                    <input
                        class="input input-bordered"
                        prop:value=first_name
                        on:input=move |ev| first_name.set(event_target_value(&ev))
                        required
                    />
                    <input
                        class="input input-bordered"
                        prop:value=last_name
                        on:input=move |ev| last_name.set(event_target_value(&ev))
                        required
                    />
                </div>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary btn-sm" disabled=move || is_saving.get()>"Save"</button>
                </div>
            </form>
        </div>
    }
}

// ============================================================================
// 学生首页
// ============================================================================

fn average_progress(courses: &[EnrollmentCourseSummary]) -> u32 {
    if courses.is_empty() {
        return 0;
    }
    let total: f64 = courses.iter().map(|c| c.progress_percent).sum();
    (total / courses.len() as f64).round() as u32
}

fn completed_count(courses: &[EnrollmentCourseSummary]) -> usize {
    courses.iter().filter(|c| c.progress_percent >= 100.0).count()
}

#[component]
fn StudentHome() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    let courses = RwSignal::new(Vec::<EnrollmentCourseSummary>::new());
    let (loading_courses, set_loading_courses) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let generation = RequestGeneration::new();
    on_cleanup({
        let generation = generation.clone();
        move || generation.invalidate()
    });

    let load_courses = move || {
        let ticket = generation.next();
        let generation = generation.clone();
        let api = auth.api();
        set_loading_courses.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = api.get_my_enrollments().await;
            if !generation.is_current(ticket) {
                tracing::debug!("dropping stale enrollments response");
                return;
            }
            match result {
                Ok(data) => courses.set(data),
                Err(e) => {
                    set_error_msg.set(Some(e.message));
                    courses.set(Vec::new());
                }
            }
            set_loading_courses.set(false);
        });
    };

    load_courses();

    let total = move || courses.with(|c| c.len());
    let progress = move || courses.with(|c| average_progress(c));
    let completed = move || courses.with(|c| completed_count(c));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Navbar />

                <div>
                    <span class="badge badge-primary badge-outline">"Welcome back"</span>
                    <h2 class="text-4xl font-bold mt-2">
                        "Hello, " <span class="text-primary">{move || user.get().map(|u| u.first_name).unwrap_or_default()}</span>
                    </h2>
                    <p class="text-base-content/70">"Continue your learning journey."</p>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"Courses"</div>
                        <div class="stat-value text-primary">{total}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Progress"</div>
                        <div class="stat-value text-secondary">{move || format!("{}%", progress())}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Completed"</div>
                        <div class="stat-value text-accent">{completed}</div>
                    </div>
                </div>

                {move || error_msg.get().map(|msg| view! {
                    <div role="alert" class="alert alert-error">
                        <span>{msg}</span>
                        <button class="btn btn-sm btn-ghost" on:click=move |_| set_error_msg.set(None)>"✕"</button>
                    </div>
                })}

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h3 class="card-title gap-2">
                                <BookOpen attr:class="h-5 w-5" /> "My Courses"
                            </h3>
                            <button on:click=move |_| load_courses() disabled=move || loading_courses.get() class="btn btn-ghost btn-circle">
                                <RefreshCw attr:class=move || if loading_courses.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>

                        <Show
                            when=move || !loading_courses.get()
                            fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner loading-lg text-primary"></span></div> }
                        >
                            <Show
                                when=move || total() != 0
                                fallback=|| view! {
                                    <div class="text-center py-8 text-base-content/50">
                                        "No courses yet. Start your learning journey by enrolling in a course."
                                    </div>
                                }
                            >
                                <div class="grid gap-4 md:grid-cols-2 xl:grid-cols-3">
                                    <For
                                        each=move || courses.get()
                                        key=|course| course.id
                                        children=move |course| view! { <CourseCard course=course /> }
                                    />
                                </div>
                            </Show>
                        </Show>
                    </div>
                </div>

                <ProfileEditor />
            </div>
        </div>
    }
}

#[component]
fn CourseCard(course: EnrollmentCourseSummary) -> impl IntoView {
    let teacher = match (&course.first_name, &course.last_name) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(name), None) | (None, Some(name)) => name.clone(),
        (None, None) => String::new(),
    };
    let enrolled = course
        .enrolled_at
        .map(|d| format!("Enrolled {}", format_date(&d)))
        .unwrap_or_default();
    let percent = course.progress_percent.clamp(0.0, 100.0);

    view! {
        <div class="card bg-base-200">
            <div class="card-body">
                <h4 class="card-title">{course.title}</h4>
                <p class="text-sm text-base-content/70">{teacher}</p>
                <progress class="progress progress-primary w-full" value=percent.to_string() max="100"></progress>
                <div class="flex justify-between text-xs text-base-content/50">
                    <span>{enrolled}</span>
                    <span>{format!("{:.0}%", percent)}</span>
                </div>
            </div>
        </div>
    }
}

// ============================================================================
// 教师首页与无权限
// ============================================================================

#[component]
fn TeacherHome() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Navbar />
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body items-center text-center">
                        <h3 class="card-title">"Teacher dashboard"</h3>
                        <p class="text-base-content/70">"Course management is coming soon."</p>
                    </div>
                </div>
                <ProfileEditor />
            </div>
        </div>
    }
}

#[component]
fn Forbidden() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"403"</h1>
                <p class="text-xl">"This area is not available for your account."</p>
                <button on:click=on_logout(auth) class="btn btn-outline btn-error gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Sign out"
                </button>
            </div>
        </div>
    }
}
