use super::entities::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
