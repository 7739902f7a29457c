//! Route modules compiled into the server and linked to their files

use filerouter::{link, LinkedModules};

use crate::state::AppState;

#[path = "../routes/index.rs"]
mod home;
#[path = "../routes/posts.rs"]
mod posts;
#[path = "../routes/users/index.rs"]
mod users;
#[path = "../routes/users/[id:int].rs"]
mod user_by_id;
#[path = "../routes/blog/[slug:].rs"]
mod blog_post;
#[path = "../routes/files/[...path].rs"]
mod files;
#[path = "../routes/api/v1/health.rs"]
mod health;

pub fn modules() -> LinkedModules<AppState> {
    let modules = LinkedModules::new();
    let modules = link!(modules, "index.rs" => home { get });
    let modules = link!(modules, "posts.rs" => posts { get, post, put, patch });
    let modules = link!(modules, "users/index.rs" => users { get, post });
    let modules = link!(modules, "users/[id:int].rs" => user_by_id { get, put, delete });
    let modules = link!(modules, "blog/[slug:].rs" => blog_post { get, put });
    let modules = link!(modules, "files/[...path].rs" => files { get, post, delete });
    link!(modules, "api/v1/health.rs" => health { get })
}
