// User-facing copy. The invitation site is Russian-only.

pub const REQUIRED_FIELDS_MISSING: &str = "Пожалуйста, заполните обязательные поля";
pub const REQUEST_FAILED: &str = "Ошибка обработки запроса. Попробуйте еще раз.";
pub const SAVE_FAILED: &str = "Ошибка сохранения данных. Попробуйте еще раз.";
pub const INVITATION_NOT_FOUND: &str = "Приглашение не найдено";

pub const RSVP_ACCEPTED: &str = "Ответ отправлен! Спасибо за подтверждение!";
pub const INVITATION_CREATED: &str = "Приглашение создано";

pub const ATTENDING_TEXT: &str = "Обязательно буду!";
pub const NOT_ATTENDING_TEXT: &str = "На этот раз без меня";

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
