#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match $e {
            None => {}
            Some(value) => panic!("expected `None`, got `Some({value:?})`"),
        }
    };
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("expected `Ok`, got `Err({err:?})`"),
        }
    };
}

#[macro_export]
macro_rules! assert_err {
    ($e:expr) => {
        match $e {
            Err(err) => err,
            Ok(_) => panic!("expected `Err`, got `Ok`"),
        }
    };
}
