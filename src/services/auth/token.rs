use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 验证 refresh token 并签发新的令牌对
    match jwt::JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => {
            let Some(user_id) = claims.user_id() else {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Invalid refresh token",
                )));
            };

            match jwt::JwtUtils::generate_token_pair(
                user_id,
                &claims.role,
                claims.school_uuid(),
                None,
            ) {
                Ok(token_pair) => {
                    let refresh_cookie =
                        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                    let response = RefreshTokenResponse {
                        access_token: token_pair.access_token,
                        refresh_token: token_pair.refresh_token,
                        expires_in: config.jwt.access_token_expiry * 60,
                    };

                    Ok(HttpResponse::Ok().cookie(refresh_cookie).json(
                        ApiResponse::success(response, "Token refreshed successfully"),
                    ))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Token refresh failed, unable to generate token",
                        )),
                    )
                }
            }
        }
        Err(e) => {
            tracing::info!("Refresh token failed: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}
