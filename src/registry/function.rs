// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Closed function tables, one per arity
//!
//! Dispatch resolves a name inside the table for the number of arguments that were
//! supplied. Every table is a plain enum so the dispatcher matches exhaustively and
//! a new entry cannot be added without an implementation.

use std::fmt;

/// Number-of-arguments bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arity {
    /// No arguments
    Nullary,
    /// One argument
    Unary,
    /// Two arguments
    Binary,
    /// Three arguments
    Ternary,
}

impl Arity {
    /// Bucket for an argument count, `None` above three
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => Some(Arity::Nullary),
            1 => Some(Arity::Unary),
            2 => Some(Arity::Binary),
            3 => Some(Arity::Ternary),
            _ => None,
        }
    }

    /// Argument count of this bucket
    pub fn count(&self) -> usize {
        match self {
            Arity::Nullary => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
            Arity::Ternary => 3,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arity::Nullary => "no arguments",
            Arity::Unary => "one argument",
            Arity::Binary => "two arguments",
            Arity::Ternary => "three arguments",
        })
    }
}

/// Declare a function table: an enum plus name lookup and documentation
macro_rules! function_table {
    (
        $(#[$meta:meta])*
        $table:ident => $arity:path {
            $($variant:ident => $name:literal, $doc:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $table {
            $(
                #[doc = $doc]
                $variant,
            )+
        }

        impl $table {
            /// Every entry of the table, in catalogue order
            pub const ALL: &'static [$table] = &[$($table::$variant),+];

            /// Arity bucket of this table
            pub const ARITY: Arity = $arity;

            /// Resolve a function name as written in an expression
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($table::$variant),)+
                    _ => None,
                }
            }

            /// Name as written in expressions
            pub fn name(&self) -> &'static str {
                match self {
                    $($table::$variant => $name,)+
                }
            }

            /// One-line description for generated documentation
            pub fn documentation(&self) -> &'static str {
                match self {
                    $($table::$variant => $doc,)+
                }
            }
        }

        impl fmt::Display for $table {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

function_table! {
    /// Functions called without arguments
    NullaryFunction => Arity::Nullary {
        Now => "now", "Current time in epoch milliseconds.";
    }
}

function_table! {
    /// Functions called with one evaluated argument
    UnaryFunction => Arity::Unary {
        Length => "length", "Character count of a string or element count of an array.";
        ToLower => "toLower", "Lower-cases a string or the text of a JSON primitive.";
        ToUpper => "toUpper", "Upper-cases a string or the text of a JSON primitive.";
        Trim => "trim", "Strips leading and trailing whitespace.";
        Abs => "abs", "Absolute value, keeping the numeric type.";
        Ceil => "ceil", "Smallest integral value not below the input.";
        Floor => "floor", "Largest integral value not above the input.";
        Round => "round", "Rounds a double half-up to an integer.";
        Sqrt => "sqrt", "Square root as a double; negative input yields NaN.";
        Base64Encode => "base64Encode", "Base64 of the UTF-8 bytes of a string.";
        Base64Decode => "base64Decode", "Decodes base64 text into a UTF-8 string.";
        UrlEncode => "urlEncode", "Form-urlencodes the UTF-8 bytes of a string.";
        UrlDecode => "urlDecode", "Decodes form-urlencoded text as UTF-8.";
        IsString => "isString", "True when the value is a string.";
        IsNumber => "isNumber", "True when the value is an integer or a double.";
        IsArray => "isArray", "True when the value is an array.";
        IsObject => "isObject", "True when the value is an object.";
        String => "string", "Textual representation of any value.";
        Integer => "integer", "Integer value of an integer or of base-10 text.";
        Float => "float", "Double value of a double or of decimal text.";
        Boolean => "boolean", "Boolean value; text other than \"true\" reads as false.";
        Object => "object", "The value as a JSON object.";
        Array => "array", "The value as a JSON array.";
        Not => "not", "Logical negation of a boolean-coercible value.";
        Registry => "registry", "Content of a registry resource.";
        Xpath => "xpath", "Evaluates an XPath expression against the current message.";
        Secret => "secret", "Resolves a secret alias through the secure vault.";
    }
}

function_table! {
    /// Functions that receive their argument unevaluated
    SpecialForm => Arity::Unary {
        Exists => "exists", "True when the argument evaluates to a non-null value without failing.";
    }
}

function_table! {
    /// Functions called with two evaluated arguments
    BinaryFunction => Arity::Binary {
        Substring => "substring", "Tail of a string from a character offset.";
        StartsWith => "startsWith", "True when the string starts with the prefix.";
        EndsWith => "endsWith", "True when the string ends with the suffix.";
        Contains => "contains", "True when the string contains the fragment.";
        Split => "split", "Splits a string around matches of a regular expression.";
        Pow => "pow", "Raises a number to a power, as a double.";
        Base64Encode => "base64Encode", "Base64 of the string's bytes in the named charset.";
        UrlEncode => "urlEncode", "Form-urlencodes the string's bytes in the named charset.";
        Registry => "registry", "Named property of a registry resource.";
    }
}

function_table! {
    /// Functions called with three evaluated arguments
    TernaryFunction => Arity::Ternary {
        Substring => "substring", "Characters of a string in [start, end).";
        Replace => "replace", "Replaces every literal occurrence of a fragment.";
    }
}
