pub mod configuration;

pub mod function {
    pub mod function;
    pub mod functionerror;
    pub mod functions;

    pub mod basic {
        pub mod trigonometricfunction;
        pub mod exp;
        pub mod log;
    }

    pub mod meta {
        pub mod sum;
        pub mod power;
        pub mod composition;
        pub mod scale;
        pub mod shift;
    }
}

pub mod tabulated {
    pub mod functionpoint;
    pub mod tabulatedfunction;
    pub mod linkedlisttabulatedfunction;
    pub mod arraytabulatedfunction;
    pub mod tabulatedfunctions;

    pub mod io {
        pub mod textformat;
        pub mod binaryformat;
        pub mod genericformat;
    }
}
