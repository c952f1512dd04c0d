// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Consultant,
    Admin,
}

// Usuário da sessão atual. Não existe cadastro real: o login escolhe
// uma das identidades fixas abaixo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl User {
    pub fn mock_consultant() -> Self {
        Self {
            id: "u1".to_string(),
            name: "Carlos Silva".to_string(),
            email: "carlos@gymflow.com".to_string(),
            role: UserRole::Consultant,
        }
    }

    pub fn mock_admin() -> Self {
        Self {
            id: "a1".to_string(),
            name: "Fernanda Gerente".to_string(),
            email: "fernanda@gymflow.com".to_string(),
            role: UserRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// Dados para login (o campo é texto livre, basta não estar vazio)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "fernanda@admin.gymflow.com")]
    pub email: String,
}
