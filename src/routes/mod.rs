pub mod principals;

pub mod students;

pub mod system;

pub mod teachers;

pub use principals::configure_principal_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_student_routes) // 学生作业路由
        .configure(configure_teacher_routes) // 教师作业路由
        .configure(configure_principal_routes) // 校长路由
        .configure(configure_system_routes); // 就绪探针
}
