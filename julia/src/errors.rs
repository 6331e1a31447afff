#![allow(missing_docs)]
#![allow(unexpected_cfgs)]

use error_chain::error_chain;

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }

    foreign_links {
        Lib(julialib::errors::Error);
        Io(std::io::Error);
    }
}
