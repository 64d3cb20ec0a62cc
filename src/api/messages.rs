//! User-facing error translation.
//!
//! Converts normalized API failures into Persian user messages while keeping
//! the English technical details alongside for diagnostic display. The raw
//! message is never shown to users directly; the technical line is preserved
//! so support can still see what the backend actually said.

use crate::api::ApiError;
use crate::auth::AuthError;

/// A translated error, split into its user-facing and diagnostic halves.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedError {
    /// Persian message for users
    pub user_message: String,
    /// English technical details
    pub technical_info: String,
}

impl ProcessedError {
    /// Combined message for display: user message with the technical line
    /// in parentheses underneath.
    pub fn display_message(&self) -> String {
        format!("{}\n({})", self.user_message, self.technical_info)
    }
}

/// Translate an authentication failure into a `ProcessedError`.
pub fn process_auth_error(error: &AuthError) -> ProcessedError {
    let api_error = match error {
        AuthError::MissingRefreshToken => {
            return ProcessedError {
                user_message: "نشست شما منقضی شده است. لطفاً دوباره وارد شوید".to_string(),
                technical_info: "Auth Error: no refresh token available".to_string(),
            }
        }
        AuthError::Api(e) => e,
    };

    let status = api_error.status();
    let message = api_error.message();

    let (user_message, technical_info) = match api_error {
        ApiError::Validation { status: 400, .. } => {
            let user = if message.contains("Password must contain") {
                "رمز عبور باید شامل حروف بزرگ، کوچک، عدد و کاراکتر خاص باشد"
            } else if message.contains("already exists") || message.contains("already taken") {
                "این ایمیل قبلاً ثبت شده است. لطفاً ایمیل دیگری استفاده کنید"
            } else if message.contains("validation") {
                "اطلاعات وارد شده نامعتبر است. لطفاً دوباره تلاش کنید"
            } else {
                "اطلاعات وارد شده صحیح نمی‌باشد"
            };
            (user.to_string(), format!("API Error 400: {}", message))
        }

        ApiError::Authentication { .. } => (
            "ایمیل یا رمز عبور اشتباه است".to_string(),
            format!("API Error 401: {}", message),
        ),

        ApiError::AccountLocked { .. } => (
            "حساب کاربری شما به دلیل تلاش‌های ناموفق قفل شده است. لطفاً ۳۰ دقیقه دیگر تلاش کنید"
                .to_string(),
            format!("API Error 423: {}", message),
        ),

        // The backend's rate-limit message names the throttled route, which
        // is what selects the right wait-time hint.
        ApiError::RateLimited { .. } => {
            if message.contains("login") {
                (
                    "تعداد تلاش‌های ورود بیش از حد مجاز است. لطفاً ۱۵ دقیقه صبر کنید".to_string(),
                    "API Error 429: Login rate limit exceeded".to_string(),
                )
            } else if message.contains("register") {
                (
                    "تعداد تلاش‌های ثبت نام بیش از حد مجاز است. لطفاً ۱ ساعت صبر کنید".to_string(),
                    "API Error 429: Registration rate limit exceeded".to_string(),
                )
            } else {
                (
                    "تعداد درخواست‌ها بیش از حد مجاز است. لطفاً کمی صبر کنید".to_string(),
                    format!("API Error 429: {}", message),
                )
            }
        }

        ApiError::Server { .. } => (
            "خطای سرور رخ داده است. لطفاً دوباره تلاش کنید".to_string(),
            format!("API Error {}: {}", status, message),
        ),

        ApiError::Network { .. } => (
            "خطا در برقراری ارتباط با سرور. لطفاً اتصال اینترنت خود را بررسی کنید".to_string(),
            format!("Network Error: {}", message),
        ),

        _ => (
            "خطای غیرمنتظره‌ای رخ داده است. لطفاً دوباره تلاش کنید".to_string(),
            if status == 0 {
                format!("API Error Unknown: {}", message)
            } else {
                format!("API Error {}: {}", status, message)
            },
        ),
    };

    ProcessedError {
        user_message,
        technical_info,
    }
}

/// Persian-only message for inline display.
pub fn user_message(error: &AuthError) -> String {
    process_auth_error(error).user_message
}

/// Full message with technical details attached.
pub fn full_message(error: &AuthError) -> String {
    process_auth_error(error).display_message()
}
