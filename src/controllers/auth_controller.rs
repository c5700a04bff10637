use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterUsuarioRequest};
use crate::dto::cliente_dto::ApiResponse;
use crate::models::usuario::{Rol, Usuario};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UsuarioRepository,
    audit: AuditRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool.clone()),
            audit: AuditRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        registrado_por: &str,
        request: RegisterUsuarioRequest,
    ) -> Result<ApiResponse<Usuario>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        let rol = Rol::from_str(&request.rol)
            .ok_or_else(|| AppError::ValidationError("El rol debe ser 'admin' o 'viewer'".to_string()))?;

        // Verificar que el nombre no exista
        if self.repository.nombre_exists(request.nombre.trim()).await? {
            return Err(AppError::Conflict("El nombre de usuario ya está registrado".to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let usuario = self.repository.create(
            request.nombre.trim().to_string(),
            request.email,
            rol.as_str().to_string(),
            password_hash,
        ).await?;

        self.audit.registrar(
            registrado_por,
            "crear_usuario",
            &format!("Usuario {} creado con rol {}", usuario.nombre, usuario.rol),
        ).await?;

        Ok(ApiResponse::success_with_message(
            usuario,
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let usuario = self.repository
            .find_by_nombre(request.nombre.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &usuario.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(usuario.id, &usuario.nombre, &usuario.rol, jwt_config)?;

        Ok(LoginResponse::success(
            token,
            usuario.id.to_string(),
            usuario.nombre,
            usuario.rol,
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Usuario, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }
}
