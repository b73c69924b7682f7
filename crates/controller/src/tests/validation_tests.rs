use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).expect("date")
}

fn valid_form() -> ReservationFormData {
    ReservationFormData {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        phone: "1234567890".into(),
        date: "2026-10-18".into(),
        time: "18:00".into(),
        message: "Test".into(),
    }
}

#[test]
fn valid_form_has_no_errors() {
    let errors = validate(&valid_form(), today());
    assert!(errors.is_empty(), "unexpected errors: {errors}");
}

#[test]
fn empty_form_reports_every_required_field_but_message() {
    let errors = validate(&ReservationFormData::default(), today());

    assert_eq!(errors.len(), 5);
    assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(FormField::Email), Some(EMAIL_REQUIRED));
    assert_eq!(errors.get(FormField::Phone), Some(PHONE_REQUIRED));
    assert_eq!(errors.get(FormField::Date), Some(DATE_REQUIRED));
    assert_eq!(errors.get(FormField::Time), Some(TIME_REQUIRED));
    assert!(!errors.contains(FormField::Message));
}

#[test]
fn whitespace_only_counts_as_empty() {
    let mut form = valid_form();
    form.name = "   ".into();
    form.phone = "\t".into();
    form.email = "  ".into();

    let errors = validate(&form, today());

    assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
    assert_eq!(errors.get(FormField::Phone), Some(PHONE_REQUIRED));
    assert_eq!(errors.get(FormField::Email), Some(EMAIL_REQUIRED));
}

#[test]
fn yesterday_yields_exactly_the_past_date_error() {
    let mut form = valid_form();
    form.date = "2026-10-16".into();

    let errors = validate(&form, today());

    let entries: Vec<(FormField, &str)> = errors.iter().collect();
    assert_eq!(entries, vec![(FormField::Date, DATE_IN_PAST)]);
}

#[test]
fn today_is_not_in_the_past() {
    let mut form = valid_form();
    form.date = "2026-10-17".into();
    assert!(validate(&form, today()).is_empty());
}

#[test]
fn email_shape_checks() {
    for ok in ["a@b.c", "john.doe@example.co.uk", "x+tag@mail.example.org"] {
        assert!(is_valid_email(ok), "{ok} should be valid");
    }
    for bad in ["plainaddress", "@example.com", "john@", "john@example", "jo hn@example.com"] {
        assert!(!is_valid_email(bad), "{bad} should be invalid");
    }

    let mut form = valid_form();
    form.email = "john@example".into();
    assert_eq!(
        validate(&form, today()).get(FormField::Email),
        Some(EMAIL_INVALID)
    );
}

#[test]
fn unparsable_date_and_time_are_invalid() {
    let mut form = valid_form();
    form.date = "18/10/2026".into();
    form.time = "six".into();

    let errors = validate(&form, today());

    assert_eq!(errors.get(FormField::Date), Some(DATE_INVALID));
    assert_eq!(errors.get(FormField::Time), Some(TIME_INVALID));
    assert_eq!(errors.len(), 2);
}

#[test]
fn message_never_fails() {
    let mut form = valid_form();
    form.message = String::new();
    assert!(validate(&form, today()).is_empty());
}

#[test]
fn errors_present_iff_some_rule_is_violated() {
    // (field, breaking value, expected message)
    let breakers = [
        (FormField::Name, "", NAME_REQUIRED),
        (FormField::Email, "nope", EMAIL_INVALID),
        (FormField::Phone, " ", PHONE_REQUIRED),
        (FormField::Date, "2020-01-01", DATE_IN_PAST),
        (FormField::Time, "", TIME_REQUIRED),
    ];

    for mask in 0u32..(1 << breakers.len()) {
        let mut form = valid_form();
        for (bit, (field, value, _)) in breakers.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                form.set(*field, *value);
            }
        }

        let errors = validate(&form, today());

        assert_eq!(errors.is_empty(), mask == 0, "mask {mask:05b}: {errors}");
        for (bit, (field, _, message)) in breakers.iter().enumerate() {
            let broken = mask & (1 << bit) != 0;
            assert_eq!(
                errors.get(*field),
                broken.then_some(*message),
                "mask {mask:05b} field {field}"
            );
        }
    }
}

#[test]
fn validation_is_idempotent() {
    let mut form = valid_form();
    form.email = "broken".into();
    form.date = "2001-01-01".into();

    let first = validate(&form, today());
    let second = validate(&form, today());

    assert_eq!(first, second);
}

#[test]
fn clearing_one_field_leaves_the_others() {
    let mut errors = validate(&ReservationFormData::default(), today());

    assert!(errors.clear(FormField::Name));
    assert!(!errors.clear(FormField::Name));
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(FormField::Email), Some(EMAIL_REQUIRED));
}

#[test]
fn display_lists_fields_in_form_order() {
    let mut form = valid_form();
    form.name.clear();
    form.time.clear();

    let errors = validate(&form, today());

    assert_eq!(
        errors.to_string(),
        "name: Name is required; time: Time is required"
    );
}
