use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 教师给出的最终分数必须在 0 到 10 之间
pub fn validate_final_score(score: f64) -> Result<(), &'static str> {
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        return Err("Final score must be between 0 and 10");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("student@school.edu.vn").is_ok());
        assert!(validate_email("teacher.name+essays@example.com").is_ok());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_validate_final_score() {
        assert!(validate_final_score(0.0).is_ok());
        assert!(validate_final_score(8.5).is_ok());
        assert!(validate_final_score(10.0).is_ok());
        assert!(validate_final_score(-0.5).is_err());
        assert!(validate_final_score(10.5).is_err());
        assert!(validate_final_score(f64::NAN).is_err());
    }
}
